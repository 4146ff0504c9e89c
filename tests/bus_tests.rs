use voiceroom::{RoomBus, TranscriptEvent};

fn event(user: &str, message: &str, message_id: u64, is_final: bool) -> TranscriptEvent {
    TranscriptEvent {
        user: user.to_string(),
        message: message.to_string(),
        message_id,
        is_final,
    }
}

#[tokio::test]
async fn test_fan_out_to_all_active_subscribers() {
    let bus = RoomBus::new(16);

    let mut first = bus.subscribe("chatroom").await;
    let mut second = bus.subscribe("chatroom").await;

    let delivered = bus.publish("chatroom", event("Alice", "hello", 0, true)).await;
    assert_eq!(delivered, 2);

    assert_eq!(first.recv().await.unwrap().message, "hello");
    assert_eq!(second.recv().await.unwrap().message, "hello");
}

#[tokio::test]
async fn test_delivery_in_publish_order() {
    let bus = RoomBus::new(16);
    let mut subscriber = bus.subscribe("chatroom").await;

    for id in 0..4 {
        bus.publish("chatroom", event("Alice", &format!("m{}", id), id, true))
            .await;
    }

    for id in 0..4 {
        let received = subscriber.recv().await.unwrap();
        assert_eq!(received.message_id, id);
        assert_eq!(received.message, format!("m{}", id));
    }
}

#[tokio::test]
async fn test_late_subscriber_sees_no_history() {
    let bus = RoomBus::new(16);

    let mut early = bus.subscribe("chatroom").await;
    bus.publish("chatroom", event("Alice", "before", 0, true)).await;

    let mut late = bus.subscribe("chatroom").await;
    bus.publish("chatroom", event("Alice", "after", 1, true)).await;

    assert_eq!(early.recv().await.unwrap().message, "before");
    assert_eq!(early.recv().await.unwrap().message, "after");

    // The late subscriber only sees what was published after it joined.
    assert_eq!(late.recv().await.unwrap().message, "after");
}

#[tokio::test]
async fn test_channels_are_independent() {
    let bus = RoomBus::new(16);

    let mut lobby = bus.subscribe("lobby").await;
    let mut standup = bus.subscribe("standup").await;

    bus.publish("lobby", event("Alice", "hi lobby", 0, true)).await;

    assert_eq!(lobby.recv().await.unwrap().message, "hi lobby");
    assert!(standup.try_recv().is_err());
}

#[tokio::test]
async fn test_publish_without_subscribers() {
    let bus = RoomBus::new(16);

    let delivered = bus.publish("chatroom", event("Alice", "anyone?", 0, true)).await;
    assert_eq!(delivered, 0);
}
