//! Hero carousel state and autoplay sessions.
//!
//! Each browser tab showing the homepage opens one session over
//! `/hero/stream`. A session owns its autoplay timer; the timer lives exactly
//! as long as the event stream and is dropped together with it.

use std::{sync::Arc, time::Duration};

use dashmap::DashMap;
use serde::Serialize;
use tokio::{
    sync::mpsc::{self, error::TrySendError},
    time::{interval_at, Instant, Interval, MissedTickBehavior},
};

use uuid::Uuid;

use crate::error::CarouselError;

const COMMAND_BUFFER: usize = 8;
const EVENT_BUFFER: usize = 16;

/// Visible-slide index over `len` slides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Carousel {
    len: usize,
    index: usize,
}

impl Carousel {
    pub fn new(len: usize) -> Self {
        Self { len, index: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn advance(&mut self) -> usize {
        if self.len > 0 {
            self.index = (self.index + 1) % self.len;
        }
        self.index
    }

    pub fn select(&mut self, index: usize) -> Result<usize, CarouselError> {
        if index >= self.len {
            return Err(CarouselError::OutOfRange {
                index,
                len: self.len,
            });
        }
        self.index = index;
        Ok(self.index)
    }
}

/// Repeating timer keyed by slide count. It is re-armed only when the count
/// changes and is not armed at all for fewer than two slides.
#[derive(Debug)]
pub struct Autoplay {
    period: Duration,
    armed_for: Option<usize>,
    interval: Option<Interval>,
}

impl Autoplay {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            armed_for: None,
            interval: None,
        }
    }

    pub fn sync(&mut self, slide_count: usize) -> bool {
        if self.armed_for == Some(slide_count) {
            return false;
        }
        self.armed_for = Some(slide_count);
        self.interval = (slide_count > 1).then(|| {
            let mut interval = interval_at(Instant::now() + self.period, self.period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            interval
        });
        true
    }

    pub fn is_armed(&self) -> bool {
        self.interval.is_some()
    }

    /// Completes on the next tick; never completes while unarmed.
    pub async fn tick(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CarouselEvent {
    Session {
        session_id: String,
        index: usize,
        slide_count: usize,
        interval_ms: u64,
    },
    Slide {
        index: usize,
    },
}

impl CarouselEvent {
    pub fn name(&self) -> &'static str {
        match self {
            CarouselEvent::Session { .. } => "session",
            CarouselEvent::Slide { .. } => "slide",
        }
    }
}

#[derive(Debug)]
enum CarouselCommand {
    Select(usize),
}

#[derive(Clone)]
struct SessionHandle {
    commands: mpsc::Sender<CarouselCommand>,
    slide_count: usize,
}

/// Open carousel sessions by id.
#[derive(Clone, Default)]
pub struct CarouselRegistry {
    sessions: Arc<DashMap<String, SessionHandle>>,
}

impl CarouselRegistry {
    /// Starts a session and returns its event stream. The first event is
    /// always [`CarouselEvent::Session`]. The session ends when the receiver
    /// is dropped.
    pub fn open(&self, slide_count: usize, period: Duration) -> mpsc::Receiver<CarouselEvent> {
        let session_id = Uuid::new_v4().to_string();
        let (command_tx, command_rx) = mpsc::channel(COMMAND_BUFFER);
        let (event_tx, event_rx) = mpsc::channel(EVENT_BUFFER);

        self.sessions.insert(
            session_id.clone(),
            SessionHandle {
                commands: command_tx,
                slide_count,
            },
        );
        log::debug!(
            "Carousel session {session_id} opened with {slide_count} slides ({} active)",
            self.active_sessions()
        );

        tokio::spawn(run_session(
            session_id,
            Arc::clone(&self.sessions),
            slide_count,
            period,
            command_rx,
            event_tx,
        ));
        event_rx
    }

    pub fn select(&self, session_id: &str, index: usize) -> Result<(), CarouselError> {
        let handle = self
            .sessions
            .get(session_id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| CarouselError::UnknownSession(session_id.to_string()))?;

        if index >= handle.slide_count {
            return Err(CarouselError::OutOfRange {
                index,
                len: handle.slide_count,
            });
        }

        handle
            .commands
            .try_send(CarouselCommand::Select(index))
            .map_err(|err| match err {
                TrySendError::Full(_) => CarouselError::SessionBusy(session_id.to_string()),
                TrySendError::Closed(_) => CarouselError::SessionClosed(session_id.to_string()),
            })
    }

    pub fn active_sessions(&self) -> usize {
        self.sessions.len()
    }
}

async fn run_session(
    session_id: String,
    sessions: Arc<DashMap<String, SessionHandle>>,
    slide_count: usize,
    period: Duration,
    mut commands: mpsc::Receiver<CarouselCommand>,
    events: mpsc::Sender<CarouselEvent>,
) {
    let mut carousel = Carousel::new(slide_count);
    let mut autoplay = Autoplay::new(period);
    autoplay.sync(carousel.len());
    if !autoplay.is_armed() {
        log::debug!("Carousel session {session_id} has {slide_count} slide(s); autoplay off");
    }

    let hello = CarouselEvent::Session {
        session_id: session_id.clone(),
        index: carousel.index(),
        slide_count,
        interval_ms: period.as_millis() as u64,
    };

    if events.send(hello).await.is_ok() {
        loop {
            tokio::select! {
                _ = autoplay.tick() => {
                    carousel.advance();
                }
                command = commands.recv() => match command {
                    Some(CarouselCommand::Select(index)) => {
                        // Manual selection keeps the autoplay phase.
                        if let Err(err) = carousel.select(index) {
                            log::warn!("Carousel session {session_id}: {err}");
                            continue;
                        }
                    }
                    None => break,
                },
                _ = events.closed() => break,
            }

            let event = CarouselEvent::Slide {
                index: carousel.index(),
            };
            if events.send(event).await.is_err() {
                break;
            }
        }
    }

    sessions.remove(&session_id);
    log::debug!("Carousel session {session_id} closed ({} active)", sessions.len());
}

#[cfg(test)]
mod tests {
    use super::*;

    const PERIOD: Duration = Duration::from_millis(5000);

    #[test]
    fn advance_wraps_around() {
        let mut carousel = Carousel::new(3);
        let seen: Vec<usize> = (0..5).map(|_| carousel.advance()).collect();
        assert_eq!(seen, vec![1, 2, 0, 1, 2]);
    }

    #[test]
    fn advance_on_empty_carousel_is_a_no_op() {
        let mut carousel = Carousel::new(0);
        assert_eq!(carousel.advance(), 0);
    }

    #[test]
    fn select_checks_range() {
        let mut carousel = Carousel::new(2);
        assert_eq!(carousel.select(1), Ok(1));
        assert_eq!(carousel.select(2), Err(CarouselError::OutOfRange { index: 2, len: 2 }));
        assert_eq!(carousel.index(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn autoplay_rearms_only_when_count_changes() {
        let mut autoplay = Autoplay::new(PERIOD);
        assert!(autoplay.sync(3));
        assert!(autoplay.is_armed());
        assert!(!autoplay.sync(3));
        assert!(autoplay.sync(1));
        assert!(!autoplay.is_armed());
    }

    #[tokio::test(start_paused = true)]
    async fn autoplay_ticks_once_per_period() {
        let mut autoplay = Autoplay::new(PERIOD);
        autoplay.sync(2);
        let start = Instant::now();
        autoplay.tick().await;
        assert_eq!(start.elapsed(), PERIOD);
        autoplay.tick().await;
        assert_eq!(start.elapsed(), PERIOD * 2);
    }

    async fn next(events: &mut mpsc::Receiver<CarouselEvent>) -> CarouselEvent {
        events.recv().await.expect("session event")
    }

    async fn open_session(
        registry: &CarouselRegistry,
        slides: usize,
    ) -> (String, mpsc::Receiver<CarouselEvent>) {
        let mut events = registry.open(slides, PERIOD);
        match next(&mut events).await {
            CarouselEvent::Session {
                session_id,
                index,
                slide_count,
                interval_ms,
            } => {
                assert_eq!(index, 0);
                assert_eq!(slide_count, slides);
                assert_eq!(interval_ms, 5000);
                (session_id, events)
            }
            other => panic!("expected session event, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn session_cycles_through_slides() {
        let registry = CarouselRegistry::default();
        let (_, mut events) = open_session(&registry, 3).await;
        let start = Instant::now();

        let mut seen = Vec::new();
        for _ in 0..4 {
            match next(&mut events).await {
                CarouselEvent::Slide { index } => seen.push(index),
                other => panic!("unexpected {other:?}"),
            }
        }
        assert_eq!(seen, vec![1, 2, 0, 1]);
        assert_eq!(start.elapsed(), PERIOD * 4);
    }

    #[tokio::test(start_paused = true)]
    async fn selection_is_immediate_and_keeps_the_timer_phase() {
        let registry = CarouselRegistry::default();
        let (session_id, mut events) = open_session(&registry, 3).await;
        let start = Instant::now();

        tokio::time::advance(Duration::from_millis(3000)).await;
        registry.select(&session_id, 2).unwrap();
        assert_eq!(next(&mut events).await, CarouselEvent::Slide { index: 2 });
        assert_eq!(start.elapsed(), Duration::from_millis(3000));

        assert_eq!(next(&mut events).await, CarouselEvent::Slide { index: 0 });
        assert_eq!(start.elapsed(), PERIOD);
    }

    #[tokio::test(start_paused = true)]
    async fn select_validates_session_and_index() {
        let registry = CarouselRegistry::default();
        let (session_id, _events) = open_session(&registry, 2).await;
        assert_eq!(
            registry.select("nope", 0),
            Err(CarouselError::UnknownSession("nope".to_string()))
        );
        assert_eq!(
            registry.select(&session_id, 5),
            Err(CarouselError::OutOfRange { index: 5, len: 2 })
        );
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_stream_closes_the_session() {
        let registry = CarouselRegistry::default();
        let (session_id, events) = open_session(&registry, 3).await;
        assert_eq!(registry.active_sessions(), 1);

        drop(events);
        for _ in 0..10 {
            if registry.active_sessions() == 0 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
        assert_eq!(registry.active_sessions(), 0);
        assert_eq!(
            registry.select(&session_id, 0),
            Err(CarouselError::UnknownSession(session_id.clone()))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn single_slide_session_stays_quiet() {
        let registry = CarouselRegistry::default();
        let (_, mut events) = open_session(&registry, 1).await;
        let waited = tokio::time::timeout(PERIOD * 3, events.recv()).await;
        assert!(waited.is_err());
    }
}
