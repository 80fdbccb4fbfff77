mod common;

use chrono::{TimeZone, Utc};

use common::{master_seed, ChildKey, MockContext};
use ggo_processor::address::Family;
use ggo_processor::handler::transfer_ggo;
use ggo_processor::model::Ggo;

fn seed_ggo(mock: &MockContext, owner: &ChildKey, amount: u64) -> String {
    let begin = Utc.with_ymd_and_hms(2020, 1, 1, 12, 0, 0).unwrap();
    let ggo = Ggo {
        origin: "measurement-addr".to_string(),
        amount,
        begin,
        end: begin + chrono::Duration::hours(1),
        sector: "DK1".to_string(),
        tech_type: "wind".to_string(),
        fuel_type: "renewable".to_string(),
        emissions: Default::default(),
        next: None,
    };
    let address = owner.address(Family::Ggo);
    mock.put_json(&address, &ggo);
    address
}

fn transfer_payload(origin: &str, destination: &str) -> Vec<u8> {
    serde_json::json!({ "origin": origin, "destination": destination })
        .to_string()
        .into_bytes()
}

#[test]
fn transfers_a_ggo_preserving_amount() {
    let owner = ChildKey::derive(master_seed(), 10);
    let recipient = ChildKey::derive(master_seed(), 11);
    let mut mock = MockContext::new();
    let origin = seed_ggo(&mock, &owner, 750);
    let destination = recipient.address(Family::Ggo);

    transfer_ggo::apply(
        &mut mock.ctx(),
        &owner.public_key_hex,
        &transfer_payload(&origin, &destination),
    )
    .expect("transfer should succeed");

    let parent: Ggo = mock.get_json(&origin).unwrap();
    assert!(parent.is_consumed());
    let child: Ggo = mock.get_json(&destination).unwrap();
    assert_eq!(child.amount, 750);
    assert_eq!(child.origin, origin);
}

#[test]
fn rejects_transfer_onto_occupied_destination() {
    let owner = ChildKey::derive(master_seed(), 10);
    let recipient = ChildKey::derive(master_seed(), 11);
    let mut mock = MockContext::new();
    let origin = seed_ggo(&mock, &owner, 750);
    let destination = seed_ggo(&mock, &recipient, 10);

    let err = transfer_ggo::apply(
        &mut mock.ctx(),
        &owner.public_key_hex,
        &transfer_payload(&origin, &destination),
    )
    .unwrap_err();
    assert!(err.to_string().contains("not empty"));
}

#[test]
fn rejects_transfer_by_non_owner() {
    let owner = ChildKey::derive(master_seed(), 10);
    let attacker = ChildKey::derive(master_seed(), 12);
    let recipient = ChildKey::derive(master_seed(), 11);
    let mut mock = MockContext::new();
    let origin = seed_ggo(&mock, &owner, 750);
    let destination = recipient.address(Family::Ggo);

    let err = transfer_ggo::apply(
        &mut mock.ctx(),
        &attacker.public_key_hex,
        &transfer_payload(&origin, &destination),
    )
    .unwrap_err();
    assert!(err.to_string().contains("Invalid key"));
}
