//! Multi-step wizard controller
//!
//! A wizard walks a fixed list of steps. Moving forward is always gated: the
//! caller supplies the verdict for the current step, and only an approving
//! verdict moves the index by exactly one. Moving back is never gated.
//!
//! Gates that need the network are run in the background. For those the
//! controller hands out an [`AdvanceTicket`] and accepts the verdict later;
//! while a ticket is outstanding further advance attempts are refused, and a
//! retreat invalidates the ticket so a late verdict cannot move the wizard.

use super::forms::{order_fields, product_fields};
use std::future::Future;

/// Check that guards leaving a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepGate {
    /// No check; used on final steps where submission validates everything
    None,
    /// Schema-validate the step's fields
    Fields,
    /// Schema-validate the step's fields, then confirm the product name is unused
    FieldsThenUniqueName,
}

/// One step of a wizard
#[derive(Debug)]
pub struct StepDefinition {
    pub label: &'static str,
    /// Fields rendered on this step and checked by its gate
    pub fields: &'static [&'static str],
    pub gate: StepGate,
}

pub const PRODUCT_STEPS: &[StepDefinition] = &[
    StepDefinition {
        label: "Basic Information",
        fields: &[
            product_fields::NAME,
            product_fields::SKU,
            product_fields::CATEGORY,
            product_fields::DESCRIPTION,
        ],
        gate: StepGate::FieldsThenUniqueName,
    },
    StepDefinition {
        label: "Inventory & Pricing",
        fields: &[product_fields::PRICE, product_fields::STOCK, product_fields::STATUS],
        gate: StepGate::Fields,
    },
    StepDefinition {
        label: "Media",
        fields: &[product_fields::IMAGE],
        gate: StepGate::None,
    },
];

pub const ORDER_STEPS: &[StepDefinition] = &[
    StepDefinition {
        label: "Client Information",
        fields: &[
            order_fields::CLIENT_NAME,
            order_fields::DELIVERY_ADDRESS,
            order_fields::DELIVERY_DATE,
        ],
        gate: StepGate::Fields,
    },
    StepDefinition {
        label: "Order Details",
        fields: &[order_fields::PRODUCTS, order_fields::QUANTITY],
        gate: StepGate::Fields,
    },
    StepDefinition {
        label: "Payment & Delivery",
        fields: &[order_fields::PAYMENT_STATUS, order_fields::DELIVERY_STATUS],
        gate: StepGate::None,
    },
];

/// A gate could not reach a verdict (as opposed to rejecting the input)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct GateError(pub String);

/// Proof of an outstanding advance attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdvanceTicket {
    step: usize,
    generation: u64,
}

impl AdvanceTicket {
    /// Step the attempt was started from
    pub fn step(&self) -> usize {
        self.step
    }
}

/// Result of an advance attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// Gate approved; now on the given step
    Moved(usize),
    /// Gate rejected the step's input
    Blocked,
    /// Gate failed to decide; the message explains why
    Unverified(String),
    /// Another attempt is still outstanding
    Busy,
    /// Already on the final step; use submit instead
    AtLastStep,
    /// The ticket was invalidated by navigation; nothing changed
    Stale,
}

/// Step index and advance bookkeeping
#[derive(Debug, Clone)]
pub struct Wizard {
    steps: &'static [StepDefinition],
    index: usize,
    generation: u64,
    pending: Option<AdvanceTicket>,
}

impl Wizard {
    pub fn new(steps: &'static [StepDefinition]) -> Self {
        debug_assert!(!steps.is_empty(), "a wizard needs at least one step");
        Self {
            steps,
            index: 0,
            generation: 0,
            pending: None,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn steps(&self) -> &'static [StepDefinition] {
        self.steps
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn current_step(&self) -> &'static StepDefinition {
        &self.steps[self.index]
    }

    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 >= self.steps.len()
    }

    /// True while an advance attempt awaits its verdict
    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    /// Start an advance attempt from the current step
    pub fn begin_advance(&mut self) -> Result<AdvanceTicket, Advance> {
        if self.pending.is_some() {
            return Err(Advance::Busy);
        }
        if self.is_last() {
            return Err(Advance::AtLastStep);
        }
        self.generation += 1;
        let ticket = AdvanceTicket {
            step: self.index,
            generation: self.generation,
        };
        self.pending = Some(ticket);
        Ok(ticket)
    }

    /// Apply the gate verdict for `ticket`
    pub fn complete_advance(
        &mut self,
        ticket: AdvanceTicket,
        verdict: Result<bool, GateError>,
    ) -> Advance {
        if self.pending != Some(ticket) {
            return Advance::Stale;
        }
        self.pending = None;

        match verdict {
            Ok(true) => {
                self.index = (self.index + 1).min(self.steps.len().saturating_sub(1));
                Advance::Moved(self.index)
            }
            Ok(false) => Advance::Blocked,
            Err(GateError(message)) => Advance::Unverified(message),
        }
    }

    /// Run `gate` for the current step and advance if it approves
    pub async fn advance<G, Fut>(&mut self, gate: G) -> Advance
    where
        G: FnOnce(usize) -> Fut,
        Fut: Future<Output = Result<bool, GateError>>,
    {
        let ticket = match self.begin_advance() {
            Ok(ticket) => ticket,
            Err(outcome) => return outcome,
        };
        let verdict = gate(ticket.step()).await;
        self.complete_advance(ticket, verdict)
    }

    /// Step back once, or jump to `target`. Returns true if the index changed.
    pub fn retreat(&mut self, target: Option<usize>) -> bool {
        self.pending = None;
        let next = match target {
            Some(step) => step.min(self.steps.len().saturating_sub(1)),
            None => self.index.saturating_sub(1),
        };
        let changed = next != self.index;
        self.index = next;
        changed
    }

    /// First step (in order) that renders any of `names`
    pub fn step_containing(&self, names: &[&str]) -> Option<usize> {
        self.steps
            .iter()
            .position(|step| step.fields.iter().any(|f| names.contains(f)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future::ready;
    use tokio_test::block_on;

    fn wizard_at(step: usize) -> Wizard {
        let mut wizard = Wizard::new(ORDER_STEPS);
        wizard.retreat(Some(step));
        wizard
    }

    mod advance {
        use super::*;

        #[test]
        fn test_rejecting_gate_never_moves() {
            for i in 0..ORDER_STEPS.len() - 1 {
                let mut wizard = wizard_at(i);
                let outcome = block_on(wizard.advance(|_| ready(Ok(false))));
                assert_eq!(outcome, Advance::Blocked);
                assert_eq!(wizard.index(), i);
            }
        }

        #[test]
        fn test_approving_gate_moves_exactly_one() {
            for i in 0..ORDER_STEPS.len() - 1 {
                let mut wizard = wizard_at(i);
                let outcome = block_on(wizard.advance(|_| ready(Ok(true))));
                assert_eq!(outcome, Advance::Moved(i + 1));
                assert_eq!(wizard.index(), i + 1);
            }
        }

        #[test]
        fn test_gate_receives_current_index() {
            let mut wizard = wizard_at(1);
            let mut seen = None;
            block_on(wizard.advance(|i| {
                seen = Some(i);
                ready(Ok(false))
            }));
            assert_eq!(seen, Some(1));
        }

        #[test]
        fn test_gate_error_is_unverified_not_blocked() {
            let mut wizard = Wizard::new(PRODUCT_STEPS);
            let outcome = block_on(
                wizard.advance(|_| ready(Err(GateError("network down".to_string())))),
            );
            assert_eq!(outcome, Advance::Unverified("network down".to_string()));
            assert_eq!(wizard.index(), 0);
            assert!(!wizard.is_busy());
        }

        #[test]
        fn test_last_step_does_not_advance() {
            let mut wizard = wizard_at(ORDER_STEPS.len() - 1);
            let outcome = block_on(wizard.advance(|_| ready(Ok(true))));
            assert_eq!(outcome, Advance::AtLastStep);
            assert_eq!(wizard.index(), ORDER_STEPS.len() - 1);
        }
    }

    mod tickets {
        use super::*;

        #[test]
        fn test_second_attempt_is_busy() {
            let mut wizard = Wizard::new(PRODUCT_STEPS);
            let ticket = wizard.begin_advance().unwrap();
            assert!(wizard.is_busy());
            assert_eq!(wizard.begin_advance(), Err(Advance::Busy));
            assert_eq!(wizard.complete_advance(ticket, Ok(true)), Advance::Moved(1));
            assert!(!wizard.is_busy());
        }

        #[test]
        fn test_verdict_applies_once() {
            let mut wizard = Wizard::new(PRODUCT_STEPS);
            let ticket = wizard.begin_advance().unwrap();
            assert_eq!(wizard.complete_advance(ticket, Ok(true)), Advance::Moved(1));
            assert_eq!(wizard.complete_advance(ticket, Ok(true)), Advance::Stale);
            assert_eq!(wizard.index(), 1);
        }

        #[test]
        fn test_retreat_invalidates_outstanding_ticket() {
            let mut wizard = wizard_at(1);
            let ticket = wizard.begin_advance().unwrap();
            wizard.retreat(None);
            assert_eq!(wizard.complete_advance(ticket, Ok(true)), Advance::Stale);
            assert_eq!(wizard.index(), 0);
        }

        #[test]
        fn test_old_ticket_does_not_match_new_attempt() {
            let mut wizard = Wizard::new(PRODUCT_STEPS);
            let old = wizard.begin_advance().unwrap();
            wizard.retreat(Some(0));
            let fresh = wizard.begin_advance().unwrap();
            assert_ne!(old, fresh);
            assert_eq!(wizard.complete_advance(old, Ok(true)), Advance::Stale);
            assert_eq!(wizard.complete_advance(fresh, Ok(true)), Advance::Moved(1));
        }
    }

    mod retreat {
        use super::*;

        #[test]
        fn test_retreat_from_first_step_is_noop() {
            let mut wizard = Wizard::new(PRODUCT_STEPS);
            assert!(!wizard.retreat(None));
            assert_eq!(wizard.index(), 0);
        }

        #[test]
        fn test_retreat_steps_back_once() {
            let mut wizard = wizard_at(2);
            assert!(wizard.retreat(None));
            assert_eq!(wizard.index(), 1);
        }

        #[test]
        fn test_jump_sets_exact_index() {
            for from in 0..PRODUCT_STEPS.len() {
                for to in 0..PRODUCT_STEPS.len() {
                    let mut wizard = Wizard::new(PRODUCT_STEPS);
                    wizard.retreat(Some(from));
                    wizard.retreat(Some(to));
                    assert_eq!(wizard.index(), to);
                }
            }
        }

        #[test]
        fn test_jump_is_clamped() {
            let mut wizard = Wizard::new(PRODUCT_STEPS);
            wizard.retreat(Some(99));
            assert_eq!(wizard.index(), PRODUCT_STEPS.len() - 1);
            assert!(wizard.is_last());
        }
    }

    mod steps {
        use super::*;

        #[test]
        fn test_product_steps_gates() {
            assert_eq!(PRODUCT_STEPS[0].gate, StepGate::FieldsThenUniqueName);
            assert_eq!(PRODUCT_STEPS[1].gate, StepGate::Fields);
            assert_eq!(PRODUCT_STEPS[2].gate, StepGate::None);
        }

        #[test]
        fn test_order_steps_partition_fields() {
            assert_eq!(
                ORDER_STEPS[0].fields,
                &["client_name", "delivery_address", "expected_delivery_date"]
            );
            assert_eq!(ORDER_STEPS[1].fields, &["products", "quantity"]);
            assert_eq!(ORDER_STEPS[2].gate, StepGate::None);
        }

        #[test]
        fn test_step_containing() {
            let wizard = Wizard::new(PRODUCT_STEPS);
            assert_eq!(wizard.step_containing(&["stock"]), Some(1));
            assert_eq!(wizard.step_containing(&["image", "product_sku"]), Some(0));
            assert_eq!(wizard.step_containing(&["missing"]), None);
        }
    }
}
