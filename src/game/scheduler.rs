//! One-shot delay before the automated opponent acts
//!
//! At most one ticket is pending. Scheduling replaces it, and nothing runs
//! until the owner awaits [`AutoplayScheduler::next_due`], so the delay
//! never overlaps a transition on the single-threaded event loop.

use crate::game::driver::{AutoplayStep, AutoplayTicket};
use std::time::Duration;
use tokio::time::{sleep_until, Instant};

#[derive(Debug)]
pub struct AutoplayScheduler {
    select_delay: Duration,
    move_delay: Duration,
    pending: Option<(AutoplayTicket, Instant)>,
}

impl AutoplayScheduler {
    pub fn new(select_delay: Duration, move_delay: Duration) -> Self {
        AutoplayScheduler {
            select_delay,
            move_delay,
            pending: None,
        }
    }

    /// Arm the timer for `ticket`, replacing any pending one
    pub fn schedule(&mut self, ticket: AutoplayTicket) {
        let delay = match ticket.step {
            AutoplayStep::Select => self.select_delay,
            AutoplayStep::Move(_) => self.move_delay,
        };
        self.pending = Some((ticket, Instant::now() + delay));
    }

    pub fn cancel(&mut self) -> Option<AutoplayTicket> {
        self.pending.take().map(|(ticket, _)| ticket)
    }

    pub fn pending(&self) -> Option<&AutoplayTicket> {
        self.pending.as_ref().map(|(ticket, _)| ticket)
    }

    /// Wait for the pending ticket's deadline and hand it over
    ///
    /// Never completes while nothing is scheduled. Dropping the future
    /// before it completes leaves the ticket pending.
    pub async fn next_due(&mut self) -> AutoplayTicket {
        loop {
            let Some((_, deadline)) = self.pending else {
                return std::future::pending().await;
            };
            sleep_until(deadline).await;
            if let Some((ticket, _)) = self.pending.take() {
                return ticket;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Color, Coord};
    use crate::engine::MoveProposal;

    fn ticket(step: AutoplayStep) -> AutoplayTicket {
        AutoplayTicket {
            color: Color::White,
            turn_number: 1,
            move_counter: 1,
            step,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticket_fires_after_delay() {
        let mut scheduler = AutoplayScheduler::new(Duration::from_millis(200), Duration::from_millis(250));
        let start = Instant::now();
        scheduler.schedule(ticket(AutoplayStep::Select));

        let fired = scheduler.next_due().await;
        assert_eq!(fired.step, AutoplayStep::Select);
        assert!(start.elapsed() >= Duration::from_millis(200));
        assert!(scheduler.pending().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_move_step_uses_move_delay() {
        let mut scheduler = AutoplayScheduler::new(Duration::from_millis(200), Duration::from_millis(250));
        let proposal = MoveProposal {
            from: Coord::new(2, 0).unwrap(),
            to: Coord::new(3, 0).unwrap(),
        };
        let start = Instant::now();
        scheduler.schedule(ticket(AutoplayStep::Move(proposal)));
        scheduler.next_due().await;
        assert!(start.elapsed() >= Duration::from_millis(250));
    }

    #[tokio::test(start_paused = true)]
    async fn test_schedule_replaces_pending() {
        let mut scheduler = AutoplayScheduler::new(Duration::from_millis(200), Duration::from_millis(250));
        scheduler.schedule(ticket(AutoplayStep::Select));
        let mut newer = ticket(AutoplayStep::Select);
        newer.move_counter = 2;
        scheduler.schedule(newer);

        assert_eq!(scheduler.next_due().await.move_counter, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_leaves_nothing_due() {
        let mut scheduler = AutoplayScheduler::new(Duration::from_millis(200), Duration::from_millis(250));
        scheduler.schedule(ticket(AutoplayStep::Select));
        assert!(scheduler.cancel().is_some());

        let waited = tokio::time::timeout(Duration::from_secs(5), scheduler.next_due()).await;
        assert!(waited.is_err());
    }
}
