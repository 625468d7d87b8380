//! Cart subcommands persist through the state directory

use super::support::Fixture;
use crate::cli::commands;
use crate::{KitLabelError, KitType};

#[test]
fn test_add_then_list_in_a_new_invocation() {
    let fixture = Fixture::new();

    commands::execute_cart_add_command("SP-HD14-SSE001REV", None, 2, fixture.config()).unwrap();
    commands::execute_cart_add_command("DUP-1", Some("shock"), 1, fixture.config()).unwrap();
    commands::execute_cart_list_command(true, fixture.config()).unwrap();

    let ctx = fixture.reopen();
    let entries = ctx.cart().entries();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].kit_type, KitType::Combi);
    assert_eq!(entries[0].quantity, 2);
    assert_eq!(entries[1].kit_type, KitType::Shock);
    assert_eq!(entries[1].product_code(), "DUP-1");
}

#[test]
fn test_update_and_remove_by_id() {
    let fixture = Fixture::new();
    commands::execute_cart_add_command("KTM-FK-77", None, 1, fixture.config()).unwrap();
    commands::execute_cart_add_command("KTM-SH-77", None, 1, fixture.config()).unwrap();

    commands::execute_cart_update_command(1, 150, fixture.config()).unwrap();
    commands::execute_cart_remove_command(2, fixture.config()).unwrap();

    let ctx = fixture.reopen();
    assert_eq!(ctx.cart().len(), 1);
    assert_eq!(ctx.cart().entries()[0].quantity, 99);
}

#[test]
fn test_unknown_kit_type_is_validation_error() {
    let fixture = Fixture::new();

    let err = commands::execute_cart_add_command("KTM-FK-77", Some("tank"), 1, fixture.config())
        .unwrap_err();

    let err = err.downcast_ref::<KitLabelError>().unwrap();
    assert_eq!(err.to_exit_code().as_i32(), 4);
    assert!(fixture.reopen().cart().is_empty());
}

#[test]
fn test_unknown_code_is_not_found() {
    let fixture = Fixture::new();

    let err =
        commands::execute_cart_add_command("NOPE", None, 1, fixture.config()).unwrap_err();

    let err = err.downcast_ref::<KitLabelError>().unwrap();
    assert_eq!(err.to_exit_code().as_i32(), 7);
}

#[test]
fn test_clear_empties_stored_cart() {
    let fixture = Fixture::new();
    commands::execute_cart_add_command("KTM-FK-77", None, 1, fixture.config()).unwrap();

    commands::execute_cart_clear_command(fixture.config()).unwrap();

    assert!(fixture.reopen().cart().is_empty());
}
