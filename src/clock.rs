use chrono::{Local, NaiveTime, Timelike};
use tokio::sync::mpsc::Sender;
use tokio::time::{Duration, sleep};
use tracing::{info, warn};

/// One rendering of the analog/digital clock. Angles are degrees clockwise
/// from 12 o'clock.
#[derive(Debug, Clone, PartialEq)]
pub struct ClockFace {
    /// Fractional: creeps half a degree per minute.
    pub hour_angle: f64,
    pub min_angle: u16,
    pub sec_angle: u16,
    /// `HH:MM:SS`, zero-padded, on the 12-hour dial (`00` at the top of the
    /// cycle).
    pub digital: String,
}

impl ClockFace {
    pub fn compute(hour: u32, minute: u32, second: u32) -> Self {
        let h = hour % 12;

        Self {
            hour_angle: (h as f64 * 30.0 + minute as f64 / 2.0) % 360.0,
            min_angle: (minute * 6) as u16,
            sec_angle: (second * 6) as u16,
            digital: format!("{h:02}:{minute:02}:{second:02}"),
        }
    }

    pub fn at(time: NaiveTime) -> Self {
        Self::compute(time.hour(), time.minute(), time.second())
    }

    pub fn now() -> Self {
        Self::at(Local::now().time())
    }
}

/// Drives the once-per-second clock refresh. Stops on its own when the
/// receiving view is torn down and the channel closes.
pub async fn run_ticker(tx: Sender<ClockFace>) {
    info!("clock ticker started");

    loop {
        sleep(Duration::from_millis(1000)).await;

        if tx.send(ClockFace::now()).await.is_err() {
            warn!("clock ticker stopping (receiver dropped)");
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digital_is_zero_padded_on_the_twelve_hour_dial() {
        assert_eq!(ClockFace::compute(9, 5, 7).digital, "09:05:07");
        assert_eq!(ClockFace::compute(21, 5, 7).digital, "09:05:07");
        assert_eq!(ClockFace::compute(23, 59, 59).digital, "11:59:59");
    }

    // Noon and midnight read "00", matching the observed screen.
    #[test]
    fn top_of_the_cycle_reads_double_zero() {
        assert_eq!(ClockFace::compute(0, 0, 0).digital, "00:00:00");
        assert_eq!(ClockFace::compute(12, 30, 15).digital, "00:30:15");
    }

    #[test]
    fn hour_hand_creeps_with_the_minutes() {
        assert_eq!(ClockFace::compute(3, 0, 0).hour_angle, 90.0);
        assert_eq!(ClockFace::compute(7, 30, 0).hour_angle, 225.0);
        // 11:59 sits just shy of the top, never wrapping past it
        assert_eq!(ClockFace::compute(11, 59, 0).hour_angle, 359.5);
        assert_eq!(ClockFace::compute(12, 0, 0).hour_angle, 0.0);
    }

    #[test]
    fn minute_and_second_hands_are_exact_and_bounded() {
        for unit in 0..60u32 {
            let face = ClockFace::compute(0, unit, unit);
            assert_eq!(face.min_angle, (unit * 6) as u16);
            assert_eq!(face.sec_angle, (unit * 6) as u16);
            assert!(face.min_angle < 360);
            assert!(face.sec_angle < 360);
        }
    }

    #[tokio::test]
    async fn ticker_stops_once_the_receiver_is_dropped() {
        let (tx, rx) = tokio::sync::mpsc::channel(1);
        drop(rx);

        // Returns instead of looping forever against a closed channel.
        tokio::time::timeout(Duration::from_secs(5), run_ticker(tx))
            .await
            .expect("ticker should stop after the receiver is gone");
    }
}
