//! The Selection barrier.
//!
//! Both players commit one card each. Neither commit is observable until
//! the barrier closes, which happens when both have committed or the
//! deadline passes. Whatever is missing at that point is left to the
//! selection fallback.
//!
//! `SelectionBarrier` runs on logical time and lives inside the engine.
//! `RemoteSelections` is the same contract for callers collecting inputs
//! on other threads: two handles, one channel and a wall-clock deadline.

use std::sync::mpsc;
use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::cards::CardId;
use crate::core::{Countdown, EngineError, PlayerId, PlayerMap};

/// Commit-then-reveal barrier with a logical deadline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectionBarrier {
    commits: PlayerMap<Option<CardId>>,
    countdown: Countdown,
}

impl SelectionBarrier {
    /// Open a barrier that expires after `timeout` units.
    #[must_use]
    pub fn new(timeout: u32) -> Self {
        Self {
            commits: PlayerMap::default(),
            countdown: Countdown::new(timeout),
        }
    }

    /// Commit a card for `player`. One commit per player per turn.
    ///
    /// Returns true once both players have committed.
    pub fn commit(&mut self, player: PlayerId, card: CardId) -> Result<bool, EngineError> {
        self.check_commit(player)?;
        self.commits[player] = Some(card);
        trace!(%player, "selection committed");
        Ok(self.all_committed())
    }

    /// Whether `commit` would accept a card from `player`. Changes nothing.
    pub fn check_commit(&self, player: PlayerId) -> Result<(), EngineError> {
        if self.countdown.is_expired() {
            return Err(EngineError::SelectionClosed);
        }
        if self.commits[player].is_some() {
            return Err(EngineError::AlreadyCommitted { player });
        }
        Ok(())
    }

    /// Whether `player` has committed. Does not reveal the card.
    #[must_use]
    pub fn has_committed(&self, player: PlayerId) -> bool {
        self.commits[player].is_some()
    }

    #[must_use]
    pub fn all_committed(&self) -> bool {
        self.commits.iter().all(|(_, c)| c.is_some())
    }

    /// Units left before the deadline.
    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.countdown.remaining()
    }

    /// Whether the barrier can be closed.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.all_committed() || self.countdown.is_expired()
    }

    /// Advance the deadline. Returns true if it passed during this call.
    pub fn tick(&mut self, units: u32) -> bool {
        let expired = self.countdown.tick(units);
        if expired {
            debug!("selection deadline passed");
        }
        expired
    }

    /// Expire the deadline now.
    pub fn force(&mut self) {
        self.countdown.expire();
    }

    /// Close the barrier and reveal both commits.
    #[must_use]
    pub fn close(self) -> PlayerMap<Option<CardId>> {
        self.commits
    }
}

/// One player's side of a `RemoteSelections` barrier.
///
/// Consumed by `commit`, so a player can commit at most once. Dropping the
/// handle without committing cancels that side.
#[derive(Debug)]
pub struct SelectionHandle {
    player: PlayerId,
    tx: mpsc::Sender<(PlayerId, CardId)>,
}

impl SelectionHandle {
    #[must_use]
    pub fn player(&self) -> PlayerId {
        self.player
    }

    /// Commit a card. Fails if the barrier was already joined.
    pub fn commit(self, card: CardId) -> Result<(), EngineError> {
        self.tx
            .send((self.player, card))
            .map_err(|_| EngineError::SelectionClosed)
    }
}

/// Join point for selections made on other threads.
#[derive(Debug)]
pub struct RemoteSelections {
    rx: mpsc::Receiver<(PlayerId, CardId)>,
}

impl RemoteSelections {
    /// Open a barrier and hand out one handle per player.
    #[must_use]
    pub fn open() -> (Self, PlayerMap<SelectionHandle>) {
        let (tx, rx) = mpsc::channel();
        let handles = PlayerMap::new(|player| SelectionHandle {
            player,
            tx: tx.clone(),
        });
        (Self { rx }, handles)
    }

    /// Wait until both players commit, both handles are dropped, or
    /// `timeout` passes. Returns whatever was committed.
    #[must_use]
    pub fn join(self, timeout: Duration) -> PlayerMap<Option<CardId>> {
        let deadline = Instant::now() + timeout;
        let mut commits: PlayerMap<Option<CardId>> = PlayerMap::default();

        while commits.iter().any(|(_, c)| c.is_none()) {
            let wait = deadline.saturating_duration_since(Instant::now());
            match self.rx.recv_timeout(wait) {
                Ok((player, card)) => {
                    commits[player].get_or_insert(card);
                }
                Err(mpsc::RecvTimeoutError::Timeout) => {
                    debug!("remote selection deadline passed");
                    break;
                }
                Err(mpsc::RecvTimeoutError::Disconnected) => break,
            }
        }
        commits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_commit_once() {
        let mut barrier = SelectionBarrier::new(10);

        assert_eq!(barrier.commit(PlayerId::FIRST, CardId::new(1)), Ok(false));
        assert_eq!(
            barrier.commit(PlayerId::FIRST, CardId::new(2)),
            Err(EngineError::AlreadyCommitted { player: PlayerId::FIRST })
        );
        assert!(!barrier.is_ready());
        assert_eq!(barrier.commit(PlayerId::SECOND, CardId::new(3)), Ok(true));
        assert!(barrier.is_ready());

        let commits = barrier.close();
        assert_eq!(commits[PlayerId::FIRST], Some(CardId::new(1)));
        assert_eq!(commits[PlayerId::SECOND], Some(CardId::new(3)));
    }

    #[test]
    fn test_deadline_closes_barrier() {
        let mut barrier = SelectionBarrier::new(10);
        barrier.commit(PlayerId::SECOND, CardId::new(4)).unwrap();

        assert!(!barrier.tick(9));
        assert!(barrier.tick(1));
        assert!(barrier.is_ready());
        assert_eq!(
            barrier.commit(PlayerId::FIRST, CardId::new(1)),
            Err(EngineError::SelectionClosed)
        );

        let commits = barrier.close();
        assert_eq!(commits[PlayerId::FIRST], None);
        assert_eq!(commits[PlayerId::SECOND], Some(CardId::new(4)));
    }

    #[test]
    fn test_check_commit_is_read_only() {
        let mut barrier = SelectionBarrier::new(10);
        barrier.commit(PlayerId::SECOND, CardId::new(4)).unwrap();

        assert_eq!(barrier.check_commit(PlayerId::FIRST), Ok(()));
        assert_eq!(
            barrier.check_commit(PlayerId::SECOND),
            Err(EngineError::AlreadyCommitted { player: PlayerId::SECOND })
        );
        assert!(!barrier.has_committed(PlayerId::FIRST));

        barrier.force();
        assert_eq!(barrier.check_commit(PlayerId::FIRST), Err(EngineError::SelectionClosed));
    }

    #[test]
    fn test_force() {
        let mut barrier = SelectionBarrier::new(10);
        barrier.force();
        assert!(barrier.is_ready());
        assert_eq!(barrier.remaining(), 0);
    }

    #[test]
    fn test_remote_join_both_commit() {
        let (remote, handles) = RemoteSelections::open();
        let [first, second] = handles.into_array();

        let t1 = thread::spawn(move || first.commit(CardId::new(7)));
        let t2 = thread::spawn(move || second.commit(CardId::new(9)));
        let commits = remote.join(Duration::from_secs(5));

        t1.join().unwrap().unwrap();
        t2.join().unwrap().unwrap();
        assert_eq!(commits[PlayerId::FIRST], Some(CardId::new(7)));
        assert_eq!(commits[PlayerId::SECOND], Some(CardId::new(9)));
    }

    #[test]
    fn test_remote_join_times_out() {
        let (remote, handles) = RemoteSelections::open();
        let [first, second] = handles.into_array();

        first.commit(CardId::new(2)).unwrap();
        let commits = remote.join(Duration::from_millis(20));

        assert_eq!(commits[PlayerId::FIRST], Some(CardId::new(2)));
        assert_eq!(commits[PlayerId::SECOND], None);
        assert_eq!(second.commit(CardId::new(3)), Err(EngineError::SelectionClosed));
    }

    #[test]
    fn test_remote_join_cancelled_side() {
        let (remote, handles) = RemoteSelections::open();
        let [first, second] = handles.into_array();

        drop(first);
        second.commit(CardId::new(5)).unwrap();
        let commits = remote.join(Duration::from_secs(5));

        assert_eq!(commits[PlayerId::FIRST], None);
        assert_eq!(commits[PlayerId::SECOND], Some(CardId::new(5)));
    }
}
