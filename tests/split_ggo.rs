mod common;

use chrono::{TimeZone, Utc};

use common::{master_seed, ChildKey, MockContext};
use ggo_processor::address::Family;
use ggo_processor::handler::split_ggo;
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

fn split_payload(origin: &str, parts: &[(&str, u64)]) -> Vec<u8> {
    let parts: Vec<_> = parts
        .iter()
        .map(|(a, amt)| serde_json::json!({"address": a, "amount": amt}))
        .collect();
    serde_json::json!({ "origin": origin, "parts": parts })
        .to_string()
        .into_bytes()
}

#[test]
fn splits_a_ggo_into_conserved_parts() {
    let owner = ChildKey::derive(master_seed(), 3);
    let recipient_a = ChildKey::derive(master_seed(), 4);
    let recipient_b = ChildKey::derive(master_seed(), 5);
    let mut mock = MockContext::new();
    let origin = seed_ggo(&mock, &owner, 1000);
    let a = recipient_a.address(Family::Ggo);
    let b = recipient_b.address(Family::Ggo);

    split_ggo::apply(
        &mut mock.ctx(),
        &owner.public_key_hex,
        &split_payload(&origin, &[(&a, 400), (&b, 600)]),
    )
    .expect("split should succeed");

    let parent: Ggo = mock.get_json(&origin).unwrap();
    assert!(parent.is_consumed());
    let part_a: Ggo = mock.get_json(&a).unwrap();
    let part_b: Ggo = mock.get_json(&b).unwrap();
    assert_eq!(part_a.amount, 400);
    assert_eq!(part_b.amount, 600);
    assert_eq!(part_a.amount + part_b.amount, 1000);
    assert_eq!(part_a.origin, origin);
    assert_eq!(part_a.sector, "DK1");
}

#[test]
fn rejects_split_sum_mismatch() {
    let owner = ChildKey::derive(master_seed(), 3);
    let recipient_a = ChildKey::derive(master_seed(), 4);
    let recipient_b = ChildKey::derive(master_seed(), 5);
    let mut mock = MockContext::new();
    let origin = seed_ggo(&mock, &owner, 1000);
    let a = recipient_a.address(Family::Ggo);
    let b = recipient_b.address(Family::Ggo);

    let err = split_ggo::apply(
        &mut mock.ctx(),
        &owner.public_key_hex,
        &split_payload(&origin, &[(&a, 400), (&b, 500)]),
    )
    .unwrap_err();
    assert!(err.to_string().contains("does not equal the whole"));
}

#[test]
fn rejects_split_by_non_owner() {
    let owner = ChildKey::derive(master_seed(), 3);
    let attacker = ChildKey::derive(master_seed(), 99);
    let recipient_a = ChildKey::derive(master_seed(), 4);
    let recipient_b = ChildKey::derive(master_seed(), 5);
    let mut mock = MockContext::new();
    let origin = seed_ggo(&mock, &owner, 1000);
    let a = recipient_a.address(Family::Ggo);
    let b = recipient_b.address(Family::Ggo);

    let err = split_ggo::apply(
        &mut mock.ctx(),
        &attacker.public_key_hex,
        &split_payload(&origin, &[(&a, 400), (&b, 600)]),
    )
    .unwrap_err();
    assert!(err.to_string().contains("Invalid key"));
}

#[test]
fn rejects_splitting_an_already_consumed_ggo() {
    let owner = ChildKey::derive(master_seed(), 3);
    let recipient_a = ChildKey::derive(master_seed(), 4);
    let recipient_b = ChildKey::derive(master_seed(), 5);
    let mut mock = MockContext::new();
    let origin = seed_ggo(&mock, &owner, 1000);
    let a = recipient_a.address(Family::Ggo);
    let b = recipient_b.address(Family::Ggo);

    split_ggo::apply(
        &mut mock.ctx(),
        &owner.public_key_hex,
        &split_payload(&origin, &[(&a, 400), (&b, 600)]),
    )
    .unwrap();

    let recipient_c = ChildKey::derive(master_seed(), 6);
    let recipient_d = ChildKey::derive(master_seed(), 7);
    let c = recipient_c.address(Family::Ggo);
    let d = recipient_d.address(Family::Ggo);
    let err = split_ggo::apply(
        &mut mock.ctx(),
        &owner.public_key_hex,
        &split_payload(&origin, &[(&c, 400), (&d, 600)]),
    )
    .unwrap_err();
    assert!(err.to_string().contains("already has been used"));
}
