//! Per-domain adapter behaviour on both paths.

mod support;

use assistant_backend::domain::OwnerKey;
use assistant_backend::domain::records::RecordId;
use assistant_backend::domain::records::conversations::FeedbackType;
use assistant_backend::domain::records::goals::{GoalProgress, ProgressSource};
use assistant_backend::domain::records::iot::{DeviceStateUpdate, DeviceStatus};
use assistant_backend::domain::records::learning::{Difficulty, VocabularyItem};
use assistant_backend::domain::records::notifications::NotificationDraft;
use assistant_backend::domain::records::profiles::{DEFAULT_SARCASM_LEVEL, ProfilePatch};
use rstest::{fixture, rstest};
use serde_json::json;

use support::{World, admin, draft, id, subject};

#[fixture]
fn world() -> World {
    World::new()
}

fn word(raw_id: i64, language: &str, text: &str, difficulty: Difficulty) -> VocabularyItem {
    VocabularyItem {
        id: RecordId::new(raw_id),
        language: language.to_owned(),
        word: text.to_owned(),
        translation: format!("{text} (en)"),
        pronunciation: None,
        part_of_speech: None,
        difficulty,
        category: None,
        example_sentence: None,
    }
}

#[rstest]
#[tokio::test]
async fn goal_progress_accumulates_and_lists_newest_first(world: World) {
    let adapters = world.adapters(world.user_a());
    let goal = adapters
        .goals
        .create_financial_goal(&draft(
            10,
            json!({ "name": "Bike", "goalType": "purchase", "targetAmountCents": 90_000 }),
        ))
        .await
        .expect("goal");

    adapters
        .goals
        .record_goal_progress(goal.id, &GoalProgress::manual(10_000))
        .await
        .expect("first");
    let second = adapters
        .goals
        .record_goal_progress(
            goal.id,
            &GoalProgress {
                amount_cents: 5_000,
                note: Some("birthday".to_owned()),
                source: ProgressSource::Manual,
            },
        )
        .await
        .expect("second")
        .expect("goal visible");
    let history = adapters
        .goals
        .get_goal_progress_history(goal.id, None)
        .await
        .expect("history");
    let reloaded = adapters
        .goals
        .get_goal_by_id(goal.id)
        .await
        .expect("lookup")
        .expect("visible");

    assert_eq!(second.new_total_cents, 15_000);
    assert_eq!(
        history.iter().map(|e| e.amount_cents).collect::<Vec<_>>(),
        vec![5_000, 10_000]
    );
    assert_eq!(reloaded.fields.current_amount_cents, 15_000);
}

#[rstest]
#[tokio::test]
async fn progress_on_another_tenants_goal_is_not_recorded(world: World) {
    let goal = world
        .adapters(world.user_a())
        .goals
        .create_financial_goal(&draft(
            10,
            json!({ "name": "Car", "goalType": "savings", "targetAmountCents": 1_000 }),
        ))
        .await
        .expect("goal");

    let outcome = world
        .adapters(world.user_b())
        .goals
        .record_goal_progress(goal.id, &GoalProgress::manual(500))
        .await
        .expect("call succeeds");

    assert!(outcome.is_none());
}

#[rstest]
#[tokio::test]
async fn vocabulary_catalogue_is_shared_and_progress_is_owned(world: World) {
    world.tenant.seed_vocabulary([
        word(1, "es", "hola", Difficulty::Beginner),
        word(2, "es", "desarrollar", Difficulty::Advanced),
        word(3, "fr", "bonjour", Difficulty::Beginner),
    ]);
    let a = world.adapters(world.user_a());

    let beginner = a
        .learning
        .get_vocabulary_items("es", Some(Difficulty::Beginner))
        .await
        .expect("catalogue");
    let enrolled = a
        .learning
        .add_vocabulary_item(&draft(
            10,
            json!({ "vocabularyItemId": 1, "language": "es" }),
        ))
        .await
        .expect("enrolled");
    let reviewed = a
        .learning
        .update_vocabulary_progress(id(10), RecordId::new(1), true)
        .await
        .expect("reviewed")
        .expect("tracked");
    let seen_by_b = world
        .adapters(world.user_b())
        .learning
        .get_user_vocabulary(id(10), None)
        .await
        .expect("listed");

    assert_eq!(
        beginner.iter().map(|w| w.word.as_str()).collect::<Vec<_>>(),
        vec!["hola"]
    );
    assert_eq!(enrolled.fields.times_reviewed, 0);
    assert_eq!(reviewed.fields.times_reviewed, 1);
    assert_eq!(reviewed.fields.correct_count, 1);
    assert!(seen_by_b.is_empty());
}

#[rstest]
#[tokio::test]
async fn translations_filter_by_category(world: World) {
    let adapters = world.adapters(admin());
    let travel = adapters
        .translation
        .create_translation_category(&draft(4, json!({ "name": "Travel" })))
        .await
        .expect("category");
    for (text, category) in [("tren", Some(travel.id.get())), ("casa", None)] {
        adapters
            .translation
            .save_translation(&draft(
                4,
                json!({
                    "originalText": text,
                    "translatedText": "?",
                    "sourceLanguage": "es",
                    "targetLanguage": "en",
                    "categoryId": category,
                }),
            ))
            .await
            .expect("saved");
    }

    let all = adapters
        .translation
        .get_saved_translations(id(4), None)
        .await
        .expect("all");
    let filtered = adapters
        .translation
        .get_saved_translations(id(4), Some(travel.id))
        .await
        .expect("filtered");
    let categories = adapters
        .translation
        .get_translation_categories(id(4))
        .await
        .expect("categories");

    assert_eq!(all.len(), 2);
    assert_eq!(
        filtered
            .iter()
            .map(|t| t.fields.original_text.as_str())
            .collect::<Vec<_>>(),
        vec!["tren"]
    );
    assert_eq!(categories.len(), 1);
}

#[rstest]
#[tokio::test]
async fn notifications_track_read_and_dismissed_state(world: World) {
    let adapters = world.adapters(world.user_a());
    let mut ids = Vec::new();
    for title in ["Rates changed", "New tip", "Reminder"] {
        let created = adapters
            .notifications
            .create_notification(&assistant_backend::domain::records::OwnedDraft::new(
                id(10),
                NotificationDraft {
                    title: title.to_owned(),
                    message: "details".to_owned(),
                },
            ))
            .await
            .expect("created");
        ids.push(created.id);
    }
    let [first, second, third] = ids.as_slice() else {
        panic!("three notifications expected");
    };

    assert!(
        adapters
            .notifications
            .mark_notification_as_read(id(10), *first)
            .await
            .expect("marked")
    );
    assert!(
        adapters
            .notifications
            .dismiss_notification(id(10), *second)
            .await
            .expect("dismissed")
    );
    let foreign = world
        .adapters(world.user_b())
        .notifications
        .mark_notification_as_read(id(10), *third)
        .await
        .expect("call succeeds");

    let unread = adapters
        .notifications
        .get_unread_notification_count(id(10))
        .await
        .expect("count");
    let listed_unread = adapters
        .notifications
        .get_user_notifications(id(10), false)
        .await
        .expect("unread");
    let listed_all = adapters
        .notifications
        .get_user_notifications(id(10), true)
        .await
        .expect("all");

    assert!(!foreign);
    assert_eq!(unread, 1);
    assert_eq!(listed_unread.len(), 1);
    assert_eq!(listed_all.len(), 2);
}

#[rstest]
#[tokio::test]
async fn conversations_list_oldest_first_and_clear_per_owner(world: World) {
    let adapters = world.adapters(admin());
    for (owner, message) in [(8, "hi"), (8, "how are you"), (9, "other user")] {
        adapters
            .conversations
            .save_conversation(&draft(
                owner,
                json!({ "userMessage": message, "assistantResponse": "hello" }),
            ))
            .await
            .expect("saved");
    }

    let eight = adapters
        .conversations
        .get_user_conversations(id(8), Some(10))
        .await
        .expect("listed");
    adapters
        .conversations
        .delete_all_user_conversations(id(8))
        .await
        .expect("cleared");
    let eight_after = adapters
        .conversations
        .get_user_conversations(id(8), None)
        .await
        .expect("listed");
    let nine_after = adapters
        .conversations
        .get_user_conversations(id(9), None)
        .await
        .expect("listed");

    assert_eq!(
        eight
            .iter()
            .map(|c| c.fields.user_message.as_str())
            .collect::<Vec<_>>(),
        vec!["hi", "how are you"]
    );
    assert!(eight_after.is_empty());
    assert_eq!(nine_after.len(), 1);
}

#[rstest]
#[tokio::test]
async fn debt_payments_are_listed_per_debt(world: World) {
    let adapters = world.adapters(world.user_a());
    let debt = adapters
        .debt
        .add_debt(&draft(
            10,
            json!({
                "name": "Card",
                "debtType": "credit_card",
                "originalBalanceCents": 100_000,
                "currentBalanceCents": 80_000,
                "interestRateBps": 1_999,
                "minimumPaymentCents": 2_500,
            }),
        ))
        .await
        .expect("debt");
    for (date, amount, balance) in [
        ("2026-03-01T00:00:00Z", 2_500, 77_500),
        ("2026-03-02T00:00:00Z", 5_000, 72_500),
    ] {
        adapters
            .debt
            .record_debt_payment(&draft(
                10,
                json!({
                    "debtId": debt.id,
                    "amountCents": amount,
                    "paymentDate": date,
                    "paymentType": "minimum",
                    "balanceAfterCents": balance,
                }),
            ))
            .await
            .expect("payment");
    }

    let history = adapters
        .debt
        .get_debt_payment_history(debt.id, id(10), Some(1))
        .await
        .expect("history");
    let other_debt = adapters
        .debt
        .get_debt_payment_history(RecordId::new(999_999), id(10), None)
        .await
        .expect("history");

    assert_eq!(
        history.iter().map(|p| p.fields.amount_cents).collect::<Vec<_>>(),
        vec![5_000]
    );
    assert!(other_debt.is_empty());
}

#[rstest]
#[tokio::test]
async fn iot_devices_are_stamped_and_confined_to_their_owner(world: World) {
    let a = world.adapters(world.user_a());
    let b = world.adapters(world.user_b());
    for (device_id, name) in [("hue-1", "Desk lamp"), ("plug-1", "Kettle")] {
        a.iot
            .add_iot_device(&draft(
                20,
                json!({
                    "deviceId": device_id,
                    "deviceName": name,
                    "deviceType": "light",
                    "connectionType": "mqtt",
                }),
            ))
            .await
            .expect("registered");
    }

    let foreign_lookup = b.iot.get_iot_device_by_id("hue-1").await.expect("lookup");
    let foreign_update = b
        .iot
        .update_iot_device_state("hue-1", &DeviceStateUpdate::online("{}"))
        .await
        .expect("update call");
    b.iot.delete_iot_device("hue-1").await.expect("delete call");
    let listed = a.iot.get_user_iot_devices(id(10)).await.expect("listed");
    let updated = a
        .iot
        .update_iot_device_state("hue-1", &DeviceStateUpdate::online(r#"{"on":true}"#))
        .await
        .expect("update")
        .expect("visible to owner");

    assert!(foreign_lookup.is_none());
    assert!(foreign_update.is_none());
    assert_eq!(
        listed
            .iter()
            .map(|d| d.fields.device_id.as_str())
            .collect::<Vec<_>>(),
        vec!["plug-1", "hue-1"]
    );
    assert!(
        listed
            .iter()
            .all(|d| d.owner == OwnerKey::from(subject("user-a")))
    );
    assert_eq!(updated.fields.status, DeviceStatus::Online);
    assert!(updated.fields.last_seen.is_some());

    a.iot.delete_iot_device("hue-1").await.expect("deleted");
    assert!(
        a.iot
            .get_iot_device_by_id("hue-1")
            .await
            .expect("lookup")
            .is_none()
    );
}

#[rstest]
#[tokio::test]
async fn device_command_history_is_newest_first_and_per_caller(world: World) {
    let a = world.adapters(world.user_a());
    for command in ["lock", "unlock", "lock"] {
        a.iot
            .save_iot_command(&draft(
                10,
                json!({ "deviceId": "lock-1", "command": command, "status": "success" }),
            ))
            .await
            .expect("logged");
    }
    a.iot
        .save_iot_command(&draft(10, json!({ "deviceId": "hue-1", "command": "turn_on" })))
        .await
        .expect("logged");

    let recent = a
        .iot
        .get_device_command_history("lock-1", Some(2))
        .await
        .expect("history");
    let all = a
        .iot
        .get_device_command_history("lock-1", None)
        .await
        .expect("history");
    let foreign = world
        .adapters(world.user_b())
        .iot
        .get_device_command_history("lock-1", None)
        .await
        .expect("history");

    assert_eq!(
        recent
            .iter()
            .map(|c| c.fields.command.as_str())
            .collect::<Vec<_>>(),
        vec!["lock", "unlock"]
    );
    assert!(recent.first().map(|c| c.created_at) > recent.last().map(|c| c.created_at));
    assert_eq!(all.len(), 3);
    assert!(foreign.is_empty());
}

#[rstest]
#[tokio::test]
async fn profiles_are_created_once_per_caller_and_patched(world: World) {
    let a = world.adapters(world.user_a());

    let before = a.profiles.get_user_profile(id(10)).await.expect("lookup");
    let created = a
        .profiles
        .create_user_profile(&draft(20, json!({})))
        .await
        .expect("created");
    let duplicate = a.profiles.create_user_profile(&draft(10, json!({}))).await;
    let patched = a
        .profiles
        .update_user_profile(
            id(20),
            &ProfilePatch {
                sarcasm_level: Some(9),
                total_interactions: Some(1),
                ..ProfilePatch::default()
            },
        )
        .await
        .expect("patched")
        .expect("profile exists");
    let seen_by_b = world
        .adapters(world.user_b())
        .profiles
        .get_user_profile(id(10))
        .await
        .expect("lookup");

    assert!(before.is_none());
    assert_eq!(created.owner, OwnerKey::from(subject("user-a")));
    assert_eq!(created.fields.sarcasm_level, DEFAULT_SARCASM_LEVEL);
    assert!(duplicate.is_err());
    assert_eq!(patched.id, created.id);
    assert_eq!(patched.fields.sarcasm_level, 9);
    assert_eq!(patched.fields.total_interactions, 1);
    assert!(seen_by_b.is_none());
}

#[rstest]
#[tokio::test]
async fn admins_manage_profiles_for_any_numeric_owner(world: World) {
    let adapters = world.adapters(admin());
    adapters
        .profiles
        .create_user_profile(&draft(5, json!({ "sarcasmLevel": 2 })))
        .await
        .expect("created");

    let five = adapters.profiles.get_user_profile(id(5)).await.expect("lookup");
    let six = adapters.profiles.get_user_profile(id(6)).await.expect("lookup");

    assert_eq!(five.map(|p| p.fields.sarcasm_level), Some(2));
    assert!(six.is_none());
}

#[rstest]
#[tokio::test]
async fn conversation_feedback_is_stamped_and_private(world: World) {
    let a = world.adapters(world.user_a());
    let turn = a
        .conversations
        .save_conversation(&draft(
            10,
            json!({ "userMessage": "joke please", "assistantResponse": "no" }),
        ))
        .await
        .expect("saved");
    for kind in ["too_sarcastic", "helpful"] {
        a.conversations
            .save_conversation_feedback(&draft(
                20,
                json!({ "conversationId": turn.id, "feedbackType": kind }),
            ))
            .await
            .expect("feedback");
    }

    let latest = a
        .conversations
        .get_conversation_feedback(turn.id)
        .await
        .expect("lookup")
        .expect("feedback exists");
    let foreign = world
        .adapters(world.user_b())
        .conversations
        .get_conversation_feedback(turn.id)
        .await
        .expect("lookup");

    assert_eq!(latest.owner, OwnerKey::from(subject("user-a")));
    assert_eq!(latest.fields.feedback_type, FeedbackType::Helpful);
    assert!(foreign.is_none());
}
