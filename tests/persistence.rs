//! Cart persistence through the file slot.

use rusty_money::iso::PHP;
use testresult::TestResult;

use amber_cart::{prelude::*, storage::DEFAULT_STORAGE_KEY};

fn restore(storage: &FileStorage) -> CartStore<FileStorage, MemberSession> {
    CartStore::restore(storage.clone(), MemberSession::anonymous(), PHP)
}

#[test]
fn cart_survives_a_restart() -> TestResult {
    let dir = tempfile::tempdir()?;
    let storage = FileStorage::new(dir.path(), DEFAULT_STORAGE_KEY);

    let diamonds = MenuItem::new("diamonds", "Diamonds", 100);
    let variation = Variation::new("86", "86 Diamonds", 20).with_member_price(10);
    let add_ons = [AddOn::new("gift", "Gift Wrap", 3).with_quantity(2)];

    let before: Vec<CartLine> = {
        let mut cart = restore(&storage);

        cart.add_to_cart(&diamonds, 2, Some(&variation), &add_ons)?;
        cart.add_to_cart(&MenuItem::new("pass", "Weekly Pass", 500), 1, None, &[])?;

        cart.iter().cloned().collect()
    };

    let cart = restore(&storage);
    let after: Vec<CartLine> = cart.iter().cloned().collect();

    assert_eq!(after, before);
    assert_eq!(cart.total_items(), 3);

    Ok(())
}

#[test]
fn stored_json_has_no_totals() -> TestResult {
    let dir = tempfile::tempdir()?;
    let storage = FileStorage::new(dir.path(), DEFAULT_STORAGE_KEY);

    let mut cart = restore(&storage);
    cart.add_to_cart(&MenuItem::new("pass", "Weekly Pass", 500), 1, None, &[])?;

    let json = std::fs::read_to_string(storage.path())?;

    assert!(json.contains("\"catalogItemId\":\"pass\""));
    assert!(!json.contains("totalPrice"));

    Ok(())
}

#[test]
fn legacy_lines_are_restored_and_repriced() -> TestResult {
    let dir = tempfile::tempdir()?;
    let storage = FileStorage::new(dir.path(), DEFAULT_STORAGE_KEY);

    std::fs::write(
        storage.path(),
        r#"[{
            "id": "diamonds:::CART:::1700000000000-k3j5h2l9q",
            "name": "Diamonds",
            "quantity": 2,
            "basePrice": 100,
            "totalPrice": 1,
            "selectedVariation": {"id": "86", "name": "86 Diamonds", "price": 20, "member_price": 10}
        }]"#,
    )?;

    let session = MemberSession::signed_in(Member::end_user("m-1", "alice"));
    let mut cart = CartStore::restore(storage.clone(), session, PHP);

    let line = cart.iter().next().ok_or("missing line")?;

    assert_eq!(line.catalog_item_id(), "diamonds");
    assert_eq!(cart.total_price()?.to_minor_units(), 220);

    // same configuration merges into the restored line
    let diamonds = MenuItem::new("diamonds", "Diamonds", 100);
    let variation = Variation::new("86", "86 Diamonds", 20).with_member_price(10);

    cart.add_to_cart(&diamonds, 1, Some(&variation), &[])?;

    assert_eq!(cart.len(), 1);
    assert_eq!(cart.total_items(), 3);

    Ok(())
}

#[test]
fn corrupt_slot_starts_an_empty_cart() -> TestResult {
    let dir = tempfile::tempdir()?;
    let storage = FileStorage::new(dir.path(), DEFAULT_STORAGE_KEY);

    std::fs::write(storage.path(), "{ this is not a cart")?;

    let mut cart = restore(&storage);

    assert!(cart.is_empty());

    cart.add_to_cart(&MenuItem::new("pass", "Weekly Pass", 500), 1, None, &[])?;

    assert_eq!(restore(&storage).len(), 1);

    Ok(())
}

#[test]
fn separate_keys_are_separate_carts() -> TestResult {
    let dir = tempfile::tempdir()?;
    let first = FileStorage::new(dir.path(), "first");
    let second = FileStorage::new(dir.path(), "second");

    let pass = MenuItem::new("pass", "Weekly Pass", 500);

    restore(&first).add_to_cart(&pass, 1, None, &[])?;

    assert_eq!(restore(&first).len(), 1);
    assert!(restore(&second).is_empty());

    Ok(())
}
