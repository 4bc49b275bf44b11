//! Role enforcement on every restricted operation. A rejected call must
//! not change any state.

use escrow_registry::{AssetRegistry, InMemoryRegistry};
use escrow_settlement::Escrow;
use escrow_types::*;
use rust_decimal::Decimal;

fn dec(n: i64) -> Decimal {
    Decimal::new(n, 0)
}

struct World {
    escrow: Escrow<InMemoryRegistry>,
    buyer: PartyId,
    seller: PartyId,
    inspector: PartyId,
    lender: PartyId,
    asset: AssetId,
}

fn listed_world() -> World {
    let buyer = PartyId::random();
    let seller = PartyId::random();
    let inspector = PartyId::random();
    let lender = PartyId::random();
    let mut registry = InMemoryRegistry::new();
    let asset = registry.mint(seller);
    let config = EscrowConfig::new(seller, inspector, lender).unwrap();
    let mut escrow = Escrow::new(config, registry).unwrap();
    let operator = escrow.address();
    escrow
        .registry_mut()
        .approve(seller, operator, asset)
        .unwrap();
    escrow.list(seller, asset, buyer, dec(10), dec(5)).unwrap();
    World {
        escrow,
        buyer,
        seller,
        inspector,
        lender,
        asset,
    }
}

fn assert_unauthorized(err: &EscrowError, caller: PartyId, role: Role) {
    match err {
        EscrowError::Unauthorized {
            caller: c,
            required,
        } => {
            assert_eq!(*c, caller);
            assert_eq!(*required, role);
        }
        other => panic!("expected Unauthorized, got {other:?}"),
    }
}

#[test]
fn only_seller_lists() {
    let mut w = listed_world();
    let fresh = w.escrow.registry_mut().mint(w.seller);
    let operator = w.escrow.address();
    w.escrow
        .registry_mut()
        .approve(w.seller, operator, fresh)
        .unwrap();

    for caller in [w.buyer, w.inspector, w.lender, PartyId::random()] {
        let err = w
            .escrow
            .list(caller, fresh, w.buyer, dec(3), dec(1))
            .unwrap_err();
        assert_unauthorized(&err, caller, Role::Seller);
    }
    assert!(!w.escrow.is_listed(fresh));
    assert_eq!(w.escrow.registry().owner_of(fresh), Some(w.seller));

    w.escrow
        .list(w.seller, fresh, w.buyer, dec(3), dec(1))
        .unwrap();
    assert!(w.escrow.is_listed(fresh));
}

#[test]
fn only_designated_buyer_deposits() {
    let mut w = listed_world();
    for caller in [w.seller, w.inspector, w.lender, PartyId::random()] {
        let err = w
            .escrow
            .deposit_earnest(caller, w.asset, dec(5))
            .unwrap_err();
        assert_unauthorized(&err, caller, Role::Buyer);
    }
    assert_eq!(w.escrow.balance(), Decimal::ZERO);
    assert_eq!(w.escrow.earnest_deposited(w.asset), Decimal::ZERO);
}

#[test]
fn unlisted_deposit_reports_not_listed_first() {
    let mut w = listed_world();
    let stranger = PartyId::random();
    let err = w
        .escrow
        .deposit_earnest(stranger, AssetId(99), dec(5))
        .unwrap_err();
    assert!(matches!(err, EscrowError::NotListed(AssetId(99))));
}

#[test]
fn only_inspector_records_inspection() {
    let mut w = listed_world();
    for caller in [w.buyer, w.seller, w.lender] {
        let err = w
            .escrow
            .update_inspection_status(caller, w.asset, true)
            .unwrap_err();
        assert_unauthorized(&err, caller, Role::Inspector);
    }
    assert!(!w.escrow.inspection_passed(w.asset));
}

#[test]
fn only_seller_finalizes() {
    let mut w = listed_world();
    w.escrow.deposit_earnest(w.buyer, w.asset, dec(5)).unwrap();
    w.escrow.fund(w.lender, dec(5)).unwrap();
    w.escrow
        .update_inspection_status(w.inspector, w.asset, true)
        .unwrap();
    for party in [w.buyer, w.seller, w.lender] {
        w.escrow.approve_sale(party, w.asset);
    }

    for caller in [w.buyer, w.inspector, w.lender] {
        let err = w.escrow.finalize_sale(caller, w.asset).unwrap_err();
        assert_unauthorized(&err, caller, Role::Seller);
    }
    assert!(w.escrow.is_listed(w.asset));
    assert_eq!(w.escrow.balance(), dec(10));
    assert_eq!(
        w.escrow.registry().owner_of(w.asset),
        Some(w.escrow.address())
    );
}

#[test]
fn seller_check_precedes_listing_check() {
    let mut w = listed_world();
    let err = w.escrow.finalize_sale(w.buyer, AssetId(42)).unwrap_err();
    assert_unauthorized(&err, w.buyer, Role::Seller);

    let err = w.escrow.finalize_sale(w.seller, AssetId(42)).unwrap_err();
    assert!(matches!(err, EscrowError::NotListed(AssetId(42))));
}

#[test]
fn anyone_may_fund_the_pool() {
    let mut w = listed_world();
    let stranger = PartyId::random();
    w.escrow.fund(stranger, dec(3)).unwrap();
    w.escrow.fund(w.lender, dec(2)).unwrap();
    assert_eq!(w.escrow.balance(), dec(5));
    assert_eq!(w.escrow.earnest_deposited(w.asset), Decimal::ZERO);
}
