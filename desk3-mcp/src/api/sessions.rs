// SSE session registry
//
// Maps session ids handed out on `/sse` to the channel feeding that
// session's event stream. A session lives exactly as long as its stream.

use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use actix_web::web::Bytes;
use futures_util::stream::{self, Stream};
use tokio::sync::mpsc;
use uuid::Uuid;

/// One server-sent event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseEvent {
    pub event: &'static str,
    pub data: String,
}

impl SseEvent {
    /// Announces the POST endpoint of a new session
    pub fn endpoint(uri: impl Into<String>) -> Self {
        Self { event: "endpoint", data: uri.into() }
    }

    /// Carries one JSON-RPC message
    pub fn message(json: impl Into<String>) -> Self {
        Self { event: "message", data: json.into() }
    }

    /// Wire encoding: an `event:` line, one `data:` line per data line, blank line
    pub fn encode(&self) -> Bytes {
        let mut out = format!("event: {}\n", self.event);
        for line in self.data.split('\n') {
            out.push_str("data: ");
            out.push_str(line);
            out.push('\n');
        }
        out.push('\n');
        Bytes::from(out)
    }
}

type SessionMap = HashMap<Uuid, mpsc::UnboundedSender<SseEvent>>;

/// Open SSE sessions
///
/// Guarded by a blocking lock: no critical section awaits, and sessions are
/// closed from `Drop`, where an async lock cannot be taken.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: RwLock<SessionMap>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new session and return its id and event receiver
    pub fn open(&self) -> (Uuid, mpsc::UnboundedReceiver<SseEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = Uuid::new_v4();
        self.write().insert(id, tx);
        (id, rx)
    }

    pub fn contains(&self, id: &Uuid) -> bool {
        self.read().contains_key(id)
    }

    /// Queue an event on a session. Returns false if the session is gone.
    pub fn send(&self, id: &Uuid, event: SseEvent) -> bool {
        let sender = self.read().get(id).cloned();

        match sender {
            Some(tx) if tx.send(event).is_ok() => true,
            Some(_) => {
                self.close(id);
                false
            },
            None => false,
        }
    }

    pub fn close(&self, id: &Uuid) {
        self.write().remove(id);
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // Every critical section is a single map operation, so a panic elsewhere
    // cannot leave the map half-updated and poisoning is safe to ignore.
    fn read(&self) -> RwLockReadGuard<'_, SessionMap> {
        self.sessions.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, SessionMap> {
        self.sessions.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Closes its session when the response stream is dropped
struct SessionGuard {
    id: Uuid,
    registry: Arc<SessionRegistry>,
    rx: mpsc::UnboundedReceiver<SseEvent>,
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        self.registry.close(&self.id);
    }
}

/// Byte stream of a session's events, suitable for a streaming response
pub fn event_stream(
    registry: Arc<SessionRegistry>,
    id: Uuid,
    rx: mpsc::UnboundedReceiver<SseEvent>,
) -> impl Stream<Item = Result<Bytes, Infallible>> {
    let guard = SessionGuard { id, registry, rx };
    stream::unfold(guard, |mut guard| async move {
        let event = guard.rx.recv().await?;
        Some((Ok(event.encode()), guard))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::StreamExt;

    #[test]
    fn test_encode_event() {
        let event = SseEvent::endpoint("/messages/?session_id=abc");
        assert_eq!(
            event.encode(),
            Bytes::from("event: endpoint\ndata: /messages/?session_id=abc\n\n")
        );
    }

    #[test]
    fn test_encode_multiline_data() {
        let event = SseEvent::message("a\nb");
        assert_eq!(event.encode(), Bytes::from("event: message\ndata: a\ndata: b\n\n"));
    }

    #[test]
    fn test_send_to_unknown_session() {
        let registry = SessionRegistry::new();
        assert!(!registry.send(&Uuid::new_v4(), SseEvent::message("{}")));
    }

    #[test]
    fn test_send_to_closed_receiver_drops_session() {
        let registry = SessionRegistry::new();
        let (id, rx) = registry.open();
        drop(rx);
        assert!(!registry.send(&id, SseEvent::message("{}")));
        assert!(!registry.contains(&id));
    }

    #[test]
    fn test_sessions_survive_a_poisoned_lock() {
        let registry = Arc::new(SessionRegistry::new());
        let poisoner = registry.clone();
        let _ = std::thread::spawn(move || {
            let _held = poisoner.sessions.write().unwrap();
            panic!("poison the session lock");
        })
        .join();
        assert!(registry.sessions.is_poisoned());

        let (id, _rx) = registry.open();
        assert!(registry.contains(&id));
        assert!(registry.send(&id, SseEvent::message("{}")));
        registry.close(&id);
        assert!(registry.is_empty());
    }

    #[tokio::test]
    async fn test_stream_yields_events_and_closes_on_drop() {
        let registry = Arc::new(SessionRegistry::new());
        let (id, rx) = registry.open();
        assert!(registry.send(&id, SseEvent::message("{\"id\":1}")));

        let mut events = Box::pin(event_stream(registry.clone(), id, rx));
        let first = events.next().await.unwrap().unwrap();
        assert_eq!(first, Bytes::from("event: message\ndata: {\"id\":1}\n\n"));
        assert_eq!(registry.len(), 1);

        drop(events);
        assert!(registry.is_empty());
    }
}
