//! Cart behaviour through the public API: line merging, add-on normalization,
//! quantity updates and member-aware totals.

use rusty_money::{Money, iso::PHP};
use testresult::TestResult;

use amber_cart::prelude::*;

fn item() -> MenuItem {
    MenuItem::new("A", "Item A", 100)
}

fn variation() -> Variation {
    Variation::new("V", "Variation V", 20)
        .with_member_price(10)
        .with_reseller_price(5)
}

fn cart(session: &MemberSession) -> CartStore<MemoryStorage, MemberSession> {
    CartStore::restore(MemoryStorage::new(), session.clone(), PHP)
}

#[test]
fn same_configuration_merges_into_one_line() -> TestResult {
    let session = MemberSession::anonymous();
    let mut cart = cart(&session);

    let add_ons = [AddOn::new("X", "Add-on X", 3)];

    let first = cart.add_to_cart(&item(), 2, Some(&variation()), &add_ons)?;
    let second = cart.add_to_cart(&item(), 3, Some(&variation()), &add_ons)?;

    assert_eq!(first, second);
    assert_eq!(cart.len(), 1);
    assert_eq!(cart.line(&first).map(CartLine::quantity), Some(5));

    Ok(())
}

#[test]
fn different_configurations_get_their_own_lines() -> TestResult {
    let session = MemberSession::anonymous();
    let mut cart = cart(&session);

    let other_variation = Variation::new("W", "Variation W", 30);
    let add_on = AddOn::new("X", "Add-on X", 3);

    let plain = cart.add_to_cart(&item(), 1, None, &[])?;
    let with_variation = cart.add_to_cart(&item(), 1, Some(&variation()), &[])?;
    let with_other_variation = cart.add_to_cart(&item(), 1, Some(&other_variation), &[])?;
    let with_add_on = cart.add_to_cart(&item(), 1, None, std::slice::from_ref(&add_on))?;
    let with_two_add_ons = cart.add_to_cart(&item(), 1, None, &[add_on.clone(), add_on])?;

    let mut ids = vec![
        plain,
        with_variation,
        with_other_variation,
        with_add_on,
        with_two_add_ons,
    ];
    ids.sort();
    ids.dedup();

    assert_eq!(ids.len(), 5);
    assert_eq!(cart.len(), 5);

    Ok(())
}

#[test]
fn equivalent_add_on_lists_normalize_identically() -> TestResult {
    let session = MemberSession::anonymous();
    let mut cart = cart(&session);

    let x = AddOn::new("x", "X", 3);
    let y = AddOn::new("y", "Y", 1);

    let first = cart.add_to_cart(&item(), 1, None, &[x.clone(), x.clone(), y.clone()])?;
    let second = cart.add_to_cart(&item(), 1, None, &[y, x.with_quantity(2)])?;

    assert_eq!(first, second);

    let line = cart.line(&first).ok_or("missing line")?;

    let add_ons: Vec<(&str, Option<u32>)> = line
        .selected_add_ons()
        .iter()
        .map(|add_on| (add_on.id.as_str(), add_on.quantity))
        .collect();

    assert_eq!(add_ons, [("x", Some(2)), ("y", Some(1))]);
    assert_eq!(line.quantity(), 2);

    Ok(())
}

#[test]
fn zero_or_negative_quantity_removes_the_line() -> TestResult {
    let session = MemberSession::anonymous();
    let mut cart = cart(&session);

    let first = cart.add_to_cart(&item(), 1, None, &[])?;
    let second = cart.add_to_cart(&MenuItem::new("B", "Item B", 50), 1, None, &[])?;

    assert!(cart.update_quantity(&first, 0));
    assert!(cart.update_quantity(&second, -5));
    assert!(cart.is_empty());

    Ok(())
}

#[test]
fn total_falls_as_member_tier_improves() -> TestResult {
    let session = MemberSession::anonymous();
    let mut cart = cart(&session);

    cart.add_to_cart(&item(), 3, Some(&variation()), &[])?;

    let anonymous = cart.total_price()?;

    session.login(Member::end_user("m-1", "alice"));
    let end_user = cart.total_price()?;

    session.login(Member::reseller("m-2", "bob"));
    let reseller = cart.total_price()?;

    assert!(anonymous.to_minor_units() > end_user.to_minor_units());
    assert!(end_user.to_minor_units() > reseller.to_minor_units());

    session.logout();
    assert_eq!(cart.total_price()?, anonymous);

    Ok(())
}

#[test]
fn line_price_depends_on_member() -> TestResult {
    let add_ons = [AddOn::new("X", "Add-on X", 3).with_quantity(2)];

    let cases = [
        (None, 126),
        (Some(Member::end_user("m-1", "alice")), 116),
        (Some(Member::reseller("m-2", "bob")), 111),
    ];

    for (member, expected) in cases {
        let mut cart = CartStore::restore(MemoryStorage::new(), member, PHP);

        cart.add_to_cart(&item(), 1, Some(&variation()), &add_ons)?;

        let lines = cart.lines()?;
        let line = lines.first().ok_or("missing line")?;

        assert_eq!(line.unit_price(), Money::from_minor(expected, PHP));
        assert_eq!(line.line_total(), Money::from_minor(expected, PHP));
        assert_eq!(cart.total_price()?, Money::from_minor(expected, PHP));
    }

    Ok(())
}

#[test]
fn variation_without_tier_prices_uses_regular_price() -> TestResult {
    let member = Some(Member::reseller("m-2", "bob"));
    let mut cart = CartStore::restore(MemoryStorage::new(), member, PHP);

    let untiered = Variation::new("W", "Variation W", 30);

    cart.add_to_cart(&item(), 1, Some(&untiered), &[])?;

    assert_eq!(cart.total_price()?, Money::from_minor(130, PHP));

    Ok(())
}
