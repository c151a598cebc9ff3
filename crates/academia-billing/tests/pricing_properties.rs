//! Property tests for the pricing engine

use academia_billing::PricingEngine;
use academia_common::{
    MembershipPlan, PaymentTiming, PricingSnapshot, ServiceSelection, VAT_DIVISOR,
};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Base prices in cents, 1.00 to 99,999.99
fn base_price() -> impl Strategy<Value = Decimal> {
    (100i64..10_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn enrollment_fee() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn timing() -> impl Strategy<Value = PaymentTiming> {
    prop_oneof![
        Just(PaymentTiming::Normal),
        Just(PaymentTiming::LateActive),
        Just(PaymentTiming::ProportionalNew),
        Just(PaymentTiming::MonthEnd),
    ]
}

fn plan() -> impl Strategy<Value = MembershipPlan> {
    (1u32..=24)
        .prop_flat_map(|paid| (Just(paid), 0u32..=paid * 2))
        .prop_map(|(paid, half_months)| {
            MembershipPlan::new("plan", "Plan", paid, Decimal::new(half_months as i64 * 5, 1))
        })
}

fn selection() -> impl Strategy<Value = ServiceSelection> {
    prop_oneof![
        (1u32..=4).prop_map(ServiceSelection::disciplines),
        (2u32..=6).prop_map(ServiceSelection::siblings),
        Just(ServiceSelection::membership("plan")),
        prop::collection::vec(1u32..=4, 1..5).prop_map(ServiceSelection::mixed_siblings),
    ]
}

fn snapshot(base: Decimal, fee: Decimal, plan: MembershipPlan) -> PricingSnapshot {
    PricingSnapshot::new(base, vec![plan], fee).unwrap()
}

proptest! {
    #[test]
    fn multi_discipline_discount_schedule(base in base_price(), count in 1u32..=4) {
        let snap = snapshot(base, dec!(0), MembershipPlan::new("plan", "Plan", 4, dec!(0)));
        let result = PricingEngine::new()
            .calculate(&ServiceSelection::disciplines(count), &snap, PaymentTiming::Normal, false)
            .unwrap();

        let factors = [dec!(0), dec!(0.5), dec!(0.75), dec!(1.0)];
        prop_assert_eq!(result.discount, base * factors[(count - 1) as usize]);
        prop_assert_eq!(result.final_amount, result.base_amount - result.discount);
    }

    #[test]
    fn sibling_discount_schedule(base in base_price(), siblings in 1u32..=3) {
        let snap = snapshot(base, dec!(0), MembershipPlan::new("plan", "Plan", 4, dec!(0)));
        let result = PricingEngine::new()
            .calculate(&ServiceSelection::siblings(siblings), &snap, PaymentTiming::Normal, false)
            .unwrap();

        let rates = [dec!(0), dec!(0.10), dec!(0.15)];
        let total = base * Decimal::from(siblings);
        prop_assert_eq!(result.discount, total * rates[(siblings - 1) as usize]);
    }

    #[test]
    fn membership_ignores_timing(base in base_price(), plan in plan(), timing in timing()) {
        let expected = base * (Decimal::from(plan.months_paid) - plan.months_saved);
        let snap = snapshot(base, dec!(0), plan);
        let result = PricingEngine::new()
            .calculate(&ServiceSelection::membership("plan"), &snap, timing, false)
            .unwrap();
        prop_assert_eq!(result.final_amount, expected);
    }

    #[test]
    fn tax_identity(
        base in base_price(),
        fee in enrollment_fee(),
        plan in plan(),
        selection in selection(),
        timing in timing(),
        include in any::<bool>(),
    ) {
        let snap = snapshot(base, fee, plan);
        let result = PricingEngine::new().calculate(&selection, &snap, timing, include).unwrap();

        prop_assert_eq!(result.tax_base + result.tax_amount, result.final_amount);
        prop_assert!((result.tax_base * VAT_DIVISOR - result.final_amount).abs() <= dec!(0.01));
    }

    #[test]
    fn amounts_are_non_negative(
        base in base_price(),
        fee in enrollment_fee(),
        plan in plan(),
        selection in selection(),
        timing in timing(),
        include in any::<bool>(),
    ) {
        let snap = snapshot(base, fee, plan);
        let result = PricingEngine::new().calculate(&selection, &snap, timing, include).unwrap();

        prop_assert!(result.discount >= Decimal::ZERO);
        prop_assert!(result.discount <= result.base_amount);
        prop_assert!(result.final_amount >= Decimal::ZERO);
        prop_assert!(result.tax_base >= Decimal::ZERO);
        prop_assert!(result.tax_amount >= Decimal::ZERO);
    }

    #[test]
    fn calculation_is_pure(
        base in base_price(),
        fee in enrollment_fee(),
        plan in plan(),
        selection in selection(),
        timing in timing(),
        include in any::<bool>(),
    ) {
        let snap = snapshot(base, fee, plan);
        let engine = PricingEngine::new();
        let first = engine.calculate(&selection, &snap, timing, include).unwrap();
        let second = engine.calculate(&selection, &snap, timing, include).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.final_amount.serialize(), second.final_amount.serialize());
    }

    #[test]
    fn enrollment_is_additive(
        base in base_price(),
        fee in enrollment_fee(),
        plan in plan(),
        selection in selection(),
        timing in timing(),
    ) {
        let snap = snapshot(base, fee, plan);
        let engine = PricingEngine::new();
        let with = engine.calculate(&selection, &snap, timing, true).unwrap();
        let without = engine.calculate(&selection, &snap, timing, false).unwrap();
        prop_assert_eq!(with.final_amount, without.final_amount + fee);
    }
}
