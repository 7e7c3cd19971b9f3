//! End-to-end conversation tests against the public planner API.

use trip_assist::planner::engine::COMPLETION_NOTICE;
use trip_assist::planner::{
    Conversation, GenerateOutcome, NextPrompt, SlotId, SlotValue, TripProfile, prompt_for, render,
};

const PARIS_ANSWERS: [&str; 12] = [
    "Paris",
    "5",
    "July 1-5",
    "Boston",
    "medium",
    "vacation",
    "culture",
    "vegetarian",
    "museums",
    "low",
    "hotel",
    "Eiffel Tower",
];

fn completed() -> Conversation {
    let mut convo = Conversation::default();
    for answer in PARIS_ANSWERS {
        convo.submit_utterance(answer);
    }
    convo
}

#[test]
fn first_prompt_is_destination_then_duration_names_it() {
    let mut convo = Conversation::default();
    assert_eq!(convo.pending_slot(), Some(SlotId::Destination));
    assert_eq!(
        prompt_for(SlotId::Destination, convo.profile()),
        convo.next_prompt().message()
    );

    convo.submit_utterance("Marrakesh");
    match convo.next_prompt() {
        NextPrompt::Ask { slot, prompt } => {
            assert_eq!(slot, SlotId::Duration);
            assert!(prompt.contains("Marrakesh"));
        }
        NextPrompt::Complete => panic!("profile should not be complete"),
    }
}

#[test]
fn pointer_walks_slots_in_order_then_completes() {
    let mut convo = Conversation::default();
    let mut visited = Vec::new();
    for answer in PARIS_ANSWERS {
        visited.push(convo.pending_slot().unwrap());
        convo.submit_utterance(answer);
    }
    assert_eq!(visited, SlotId::ALL.to_vec());
    assert_eq!(convo.pending_slot(), None);

    let thirteenth = convo.submit_utterance("what now?");
    assert_eq!(thirteenth.message, COMPLETION_NOTICE);
    assert!(thirteenth.next.is_complete());
}

#[test]
fn parsing_policies_match_slot_kinds() {
    let convo = completed();
    let profile = convo.profile();
    assert_eq!(profile.duration, Some(SlotValue::Integer(5)));
    assert_eq!(profile.dates, Some(SlotValue::Text("July 1-5".into())));
    assert_eq!(
        profile.preferences,
        Some(SlotValue::List(vec!["culture".into()]))
    );
    assert_eq!(
        profile.must_see,
        Some(SlotValue::Text("Eiffel Tower".into()))
    );

    let mut other = Conversation::default();
    other.submit_utterance("Rome");
    other.submit_utterance("five");
    other.submit_utterance("July");
    assert_eq!(other.profile().duration, Some(SlotValue::Text("five".into())));
    assert_eq!(other.profile().dates, Some(SlotValue::Text("July".into())));
}

#[test]
fn render_after_completion_has_expected_header() {
    let mut convo = completed();
    let doc = match convo.generate_itinerary(None) {
        GenerateOutcome::Generated(doc) => doc,
        other => panic!("expected Generated, got {other:?}"),
    };
    assert_eq!(doc.title, "Paris Travel Itinerary (5 days)");
    assert_eq!(doc, render(convo.profile()));
}

#[test]
fn exported_profile_roundtrips() {
    let mut convo = completed();
    convo.generate_itinerary(None);
    let export = convo.export().unwrap();

    let json = serde_json::to_value(&export.profile).unwrap();
    assert_eq!(json["duration"], 5);
    assert_eq!(json["interests"], serde_json::json!(["museums"]));

    let parsed: TripProfile = serde_json::from_value(json).unwrap();
    assert_eq!(&parsed, convo.profile());
}

#[test]
fn reset_after_completion_starts_over() {
    let mut convo = completed();
    convo.generate_itinerary(None);
    convo.reset();

    assert_eq!(convo.pending_slot(), Some(SlotId::Destination));
    for slot in SlotId::ALL {
        assert!(!convo.profile().is_answered(slot), "{slot} should be cleared");
    }
    assert!(convo.itinerary().is_none());

    // The interview runs again from the top.
    let reply = convo.submit_utterance("Lima");
    assert_eq!(reply.recorded, Some(SlotId::Destination));
    assert_eq!(reply.message, "How many days will you be in Lima?");
}
