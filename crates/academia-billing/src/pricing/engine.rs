//! Tuition and membership pricing engine
//!
//! Maps a [`ServiceSelection`] and a [`PricingSnapshot`] to a [`PaymentResult`]:
//! - prices the selection (discipline, sibling, membership or mixed-sibling rule)
//! - applies the timing multiplier (never to memberships)
//! - adds the enrollment fee when requested
//! - extracts the 16% VAT already included in the gross total
//!
//! The engine is pure: no I/O, no caching, no state between calls. All
//! arithmetic is checked; an amount that does not fit in a `Decimal` is a
//! [`PricingError::AmountOverflow`], never a panic.

use academia_common::{
    DiscountType, MembershipPlan, MembershipTier, PaymentResult, PaymentTiming, PricingError,
    PricingSnapshot, Result, ServiceSelection, CURRENCY_DP, VAT_DIVISOR, VAT_RATE,
};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use super::discounts::{multi_discipline_discount, sibling_discount_rate};

/// Stateless pricing engine
#[derive(Debug, Clone, Copy, Default)]
pub struct PricingEngine;

/// A membership plan with its price under the current base price
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipOffer {
    pub plan: MembershipPlan,
    pub membership_type: MembershipTier,
    pub base_amount: Decimal,
    pub discount: Decimal,
    /// `months_paid × base_price - months_saved × base_price`
    pub total_price: Decimal,
}

/// Tuition priced by one of the selection rules, before timing and enrollment
#[derive(Debug, Clone)]
struct Tuition {
    base_amount: Decimal,
    discount: Decimal,
    discount_type: Option<DiscountType>,
    disciplines_count: u32,
    siblings_count: u32,
    plan: Option<MembershipPlan>,
    description: String,
    lines: Vec<String>,
}

impl Tuition {
    fn net(&self) -> Decimal {
        self.base_amount - self.discount
    }
}

impl PricingEngine {
    pub fn new() -> Self {
        Self
    }

    /// Price a selection.
    ///
    /// Fails only when the snapshot is unusable (non-positive base price, a
    /// plan saving more months than it charges) or a membership id does not
    /// resolve. Discipline/sibling combinations without a rule come back as
    /// a zeroed result with `invalid_reason` set.
    #[instrument(skip(self, snapshot), fields(base_price = %snapshot.base_price))]
    pub fn calculate(
        &self,
        selection: &ServiceSelection,
        snapshot: &PricingSnapshot,
        timing: PaymentTiming,
        include_enrollment: bool,
    ) -> Result<PaymentResult> {
        snapshot.validate()?;

        if let Some(reason) = selection.configuration_issue() {
            warn!(%reason, "Selection has no pricing rule");
            return Ok(PaymentResult::invalid(reason, timing));
        }

        let tuition = match selection {
            ServiceSelection::Disciplines { count, siblings } => {
                Self::price_disciplines(snapshot.base_price, *count, *siblings)?
            }
            ServiceSelection::Membership { membership_id } => {
                let plan = snapshot.membership(membership_id)?;
                plan.validate()?;
                Self::price_membership(snapshot.base_price, plan)?
            }
            ServiceSelection::SiblingsWithMixedDisciplines {
                disciplines_per_sibling,
            } => Self::price_mixed_siblings(snapshot.base_price, disciplines_per_sibling)?,
        };

        Self::finish(selection, tuition, snapshot, timing, include_enrollment)
    }

    /// Every plan in the catalog priced at the snapshot's base price
    pub fn list_available_memberships(
        &self,
        snapshot: &PricingSnapshot,
    ) -> Result<Vec<MembershipOffer>> {
        snapshot
            .membership_catalog
            .iter()
            .map(|plan| -> Result<MembershipOffer> {
                let (base_amount, discount) = membership_amounts(snapshot.base_price, plan)?;
                Ok(MembershipOffer {
                    plan: plan.clone(),
                    membership_type: plan.tier(),
                    base_amount,
                    discount,
                    total_price: base_amount - discount,
                })
            })
            .collect()
    }

    pub fn current_base_price(&self, snapshot: &PricingSnapshot) -> Decimal {
        snapshot.base_price
    }

    pub fn current_enrollment_fee(&self, snapshot: &PricingSnapshot) -> Decimal {
        snapshot.enrollment_fee
    }

    /// One student with `count` disciplines, or `siblings` students with one each
    fn price_disciplines(base_price: Decimal, count: u32, siblings: u32) -> Result<Tuition> {
        if siblings > 1 {
            let base_amount = mul(base_price, Decimal::from(siblings), "sibling base amount")?;
            let rate = sibling_discount_rate(siblings);
            let discount = mul(base_amount, rate, "sibling discount")?;
            debug!(siblings, %rate, "Pricing siblings");

            let mut lines = vec![format!(
                "{} siblings × ${:.2} = ${:.2}",
                siblings, base_price, base_amount
            )];
            if rate.is_zero() {
                lines.push(format!("No sibling discount tier for {} siblings", siblings));
            } else {
                lines.push(format!(
                    "Sibling discount {}%: -${:.2}",
                    (rate * Decimal::ONE_HUNDRED).normalize(),
                    discount
                ));
            }

            return Ok(Tuition {
                base_amount,
                discount,
                discount_type: (!rate.is_zero()).then_some(DiscountType::Siblings),
                disciplines_count: siblings,
                siblings_count: siblings,
                plan: None,
                description: format!("{} siblings, 1 discipline each", siblings),
                lines,
            });
        }

        let base_amount = mul(base_price, Decimal::from(count), "discipline base amount")?;
        let discount = multi_discipline_discount(base_price, count)
            .ok_or_else(|| overflow("multi-discipline discount"))?;
        debug!(count, %discount, "Pricing disciplines");

        let mut lines = vec![format!(
            "{} discipline(s) × ${:.2} = ${:.2}",
            count, base_price, base_amount
        )];
        if count > 1 {
            lines.push(format!("Multi-discipline discount: -${:.2}", discount));
        }

        Ok(Tuition {
            base_amount,
            discount,
            discount_type: (count > 1).then_some(DiscountType::MultiDiscipline),
            disciplines_count: count,
            siblings_count: 1,
            plan: None,
            description: if count == 1 {
                "1 discipline".to_string()
            } else {
                format!("{} disciplines", count)
            },
            lines,
        })
    }

    fn price_membership(base_price: Decimal, plan: &MembershipPlan) -> Result<Tuition> {
        let (base_amount, discount) = membership_amounts(base_price, plan)?;
        let tier = plan.tier();
        debug!(plan = %plan.id, %tier, "Pricing membership");

        let mut lines = vec![format!(
            "{} months × ${:.2} = ${:.2}",
            plan.months_paid, base_price, base_amount
        )];
        if !discount.is_zero() {
            lines.push(format!(
                "{} months saved: -${:.2}",
                plan.months_saved.normalize(),
                discount
            ));
        }

        Ok(Tuition {
            base_amount,
            discount,
            discount_type: (!discount.is_zero()).then_some(DiscountType::Membership),
            disciplines_count: 1,
            siblings_count: 1,
            plan: Some(plan.clone()),
            description: format!("Membership {} ({})", plan.name, tier),
            lines,
        })
    }

    /// Each sibling priced alone; per-sibling discounts stay inside each term
    /// and the aggregate `discount` is reported as zero.
    fn price_mixed_siblings(
        base_price: Decimal,
        disciplines_per_sibling: &[u32],
    ) -> Result<Tuition> {
        let mut total = Decimal::ZERO;
        let mut lines = Vec::with_capacity(disciplines_per_sibling.len());

        for (i, count) in disciplines_per_sibling.iter().enumerate() {
            let sibling = Self::price_disciplines(base_price, *count, 1)?;
            lines.push(format!(
                "Sibling {}: {} = ${:.2}",
                i + 1,
                sibling.description,
                sibling.net()
            ));
            total = add(total, sibling.net(), "mixed sibling total")?;
        }
        debug!(siblings = disciplines_per_sibling.len(), %total, "Pricing mixed siblings");

        Ok(Tuition {
            base_amount: total,
            discount: Decimal::ZERO,
            discount_type: None,
            disciplines_count: disciplines_per_sibling.iter().sum(),
            siblings_count: disciplines_per_sibling.len() as u32,
            plan: None,
            description: format!(
                "{} siblings with individual disciplines",
                disciplines_per_sibling.len()
            ),
            lines,
        })
    }

    /// Timing, enrollment and tax extraction
    fn finish(
        selection: &ServiceSelection,
        tuition: Tuition,
        snapshot: &PricingSnapshot,
        timing: PaymentTiming,
        include_enrollment: bool,
    ) -> Result<PaymentResult> {
        let net = tuition.net();
        let is_membership = selection.is_membership();
        let mut lines = tuition.lines;

        // Memberships are prepaid; the late surcharge never applies to them.
        let subtotal = if is_membership {
            net
        } else {
            mul(net, timing.multiplier(), "timing adjustment")?
        };
        let timing_adjustment = subtotal - net;
        if !timing_adjustment.is_zero() {
            lines.push(format!(
                "{} adjustment: +${:.2}",
                timing.as_str(),
                timing_adjustment
            ));
        }

        let enrollment_fee = if include_enrollment {
            snapshot.enrollment_fee
        } else {
            Decimal::ZERO
        };
        if include_enrollment {
            lines.push(format!("Enrollment fee: +${:.2}", enrollment_fee));
        }

        let final_amount = add(subtotal, enrollment_fee, "final amount")?;
        let (tax_base, tax_amount) = extract_tax(final_amount);
        lines.push(format!("Total: ${:.2}", final_amount));
        lines.push(format!(
            "Tax base: ${:.2} + VAT {}%: ${:.2}",
            tax_base,
            (VAT_RATE * Decimal::ONE_HUNDRED).normalize(),
            tax_amount
        ));

        let (frequency, months_paid, months_saved, membership_type) = match &tuition.plan {
            Some(plan) => (
                format!("Every {} months", plan.months_paid),
                plan.months_paid,
                plan.months_saved,
                Some(plan.tier()),
            ),
            None => ("Monthly".to_string(), 0, Decimal::ZERO, None),
        };

        Ok(PaymentResult {
            base_amount: tuition.base_amount,
            discount: tuition.discount,
            subtotal_before_tax: subtotal,
            timing_adjustment,
            enrollment_fee,
            includes_enrollment: include_enrollment,
            final_amount,
            tax_base,
            tax_amount,
            timing,
            discount_type: tuition.discount_type,
            membership_type,
            disciplines_count: tuition.disciplines_count,
            siblings_count: tuition.siblings_count,
            frequency,
            is_membership,
            months_paid,
            months_saved,
            description: tuition.description,
            breakdown: lines.join("\n"),
            invalid_reason: None,
        })
    }
}

/// `months_paid × base_price` and `months_saved × base_price`
fn membership_amounts(
    base_price: Decimal,
    plan: &MembershipPlan,
) -> std::result::Result<(Decimal, Decimal), PricingError> {
    let base_amount = mul(Decimal::from(plan.months_paid), base_price, "membership base amount")?;
    let discount = mul(plan.months_saved, base_price, "membership discount")?;
    Ok((base_amount, discount))
}

fn mul(a: Decimal, b: Decimal, amount: &str) -> std::result::Result<Decimal, PricingError> {
    a.checked_mul(b).ok_or_else(|| overflow(amount))
}

fn add(a: Decimal, b: Decimal, amount: &str) -> std::result::Result<Decimal, PricingError> {
    a.checked_add(b).ok_or_else(|| overflow(amount))
}

fn overflow(amount: &str) -> PricingError {
    PricingError::AmountOverflow(amount.to_string())
}

/// Split a VAT-inclusive gross amount into (tax base, tax)
pub fn extract_tax(gross: Decimal) -> (Decimal, Decimal) {
    let tax_base = (gross / VAT_DIVISOR)
        .round_dp_with_strategy(CURRENCY_DP, RoundingStrategy::MidpointAwayFromZero);
    (tax_base, gross - tax_base)
}
