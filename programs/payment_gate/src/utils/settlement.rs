use anchor_lang::prelude::*;

use crate::errors::GateError;
use crate::events::{CheckedIn, CheckedOut};
use crate::state::{Flow, FlowRouter, Gate};

/// Outcome of reconciling one inbound flow change against a gate
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum FlowTransition {
    /// The payer is now recognized as checked in
    CheckedIn,
    /// The payer is no longer recognized as checked in
    CheckedOut,
    /// The flow changed but the check-in bookkeeping did not
    Unchanged,
}

/// Classify a flow change. The verdict depends only on the new rate and
/// the gate's configured rate, never on which path triggered the change:
/// a flow at exactly the gate rate is a check-in, anything else (including
/// deletion to zero) drops the check-in. How the flow reached its previous
/// rate is irrelevant.
pub fn classify(was_checked_in: bool, new_rate: u64, gate_rate: u64) -> FlowTransition {
    match (was_checked_in, new_rate == gate_rate) {
        (false, true) => FlowTransition::CheckedIn,
        (true, false) => FlowTransition::CheckedOut,
        _ => FlowTransition::Unchanged,
    }
}

/// Apply one inbound flow change and reconcile all derived state in the
/// same transaction: the flow record itself, the router's inbound table,
/// the gate's active-user set, and the aggregate outbound flow to the
/// merchant. This is the single entry point for every flow mutation,
/// whether it came from check-in/check-out or from a payer driving the
/// flow directly. It adjusts only the router-to-merchant edge, never the
/// inbound edge that triggered it.
pub fn settle(
    gate: &mut Gate,
    router: &mut FlowRouter,
    flow: &mut Flow,
    outbound: &mut Flow,
    payer: Pubkey,
    new_rate: u64,
) -> Result<FlowTransition> {
    flow.rate = new_rate;

    let was_checked_in = router.is_checked_in(&payer);
    let transition = classify(was_checked_in, new_rate, gate.flow_rate);

    match transition {
        FlowTransition::CheckedIn => {
            router.record_inbound(payer, new_rate)?;
            gate.add_active_user(payer)?;
            emit!(CheckedIn {
                payer,
                gate_id: gate.id,
                flow_rate: gate.flow_rate,
                token: gate.token,
            });
            msg!("payer {} checked in at gate {} ({})", payer, gate.id, gate.name);
        }
        FlowTransition::CheckedOut => {
            router.clear_inbound(&payer);
            gate.remove_active_user(&payer);
            emit!(CheckedOut {
                payer,
                gate_id: gate.id,
            });
            msg!("payer {} checked out of gate {}", payer, gate.id);
        }
        FlowTransition::Unchanged => {
            msg!(
                "flow from {} at rate {} does not match gate rate {}, bookkeeping unchanged",
                payer,
                new_rate,
                gate.flow_rate
            );
        }
    }

    router.out_rate = router.aggregate_rate()?;
    outbound.rate = router.out_rate;
    Ok(transition)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixtures(gate_rate: u64) -> (Gate, FlowRouter, Flow, Pubkey) {
        let owner = Pubkey::new_unique();
        let token = Pubkey::new_unique();
        let gate = Gate {
            id: 1,
            name: "bike 1".to_string(),
            flow_rate: gate_rate,
            token,
            owner,
            active_users: Vec::new(),
            bump: 255,
        };
        let router = FlowRouter {
            gate_id: 1,
            owner,
            token,
            inbound: Vec::new(),
            out_rate: 0,
            bump: 255,
        };
        let outbound = Flow {
            token,
            sender: Pubkey::new_unique(),
            receiver: owner,
            rate: 0,
            bump: 255,
        };
        (gate, router, outbound, token)
    }

    fn inbound(token: Pubkey, payer: Pubkey) -> Flow {
        Flow {
            token,
            sender: payer,
            receiver: Pubkey::new_unique(),
            rate: 0,
            bump: 255,
        }
    }

    #[test]
    fn classify_matrix() {
        // not checked in, matching rate: check-in
        assert_eq!(classify(false, 3, 3), FlowTransition::CheckedIn);
        // not checked in, mismatched or zero rate: never a check-in
        assert_eq!(classify(false, 2, 3), FlowTransition::Unchanged);
        assert_eq!(classify(false, 5, 3), FlowTransition::Unchanged);
        assert_eq!(classify(false, 0, 3), FlowTransition::Unchanged);
        // checked in, rate drifts or drops: check-out
        assert_eq!(classify(true, 0, 3), FlowTransition::CheckedOut);
        assert_eq!(classify(true, 4, 3), FlowTransition::CheckedOut);
        // checked in, rate still matches: nothing to do
        assert_eq!(classify(true, 3, 3), FlowTransition::Unchanged);
    }

    #[test]
    fn check_in_then_out_moves_aggregate_by_exactly_the_rate() {
        let (mut gate, mut router, mut outbound, token) = fixtures(1);
        let payer = Pubkey::new_unique();
        let mut flow = inbound(token, payer);

        let t = settle(&mut gate, &mut router, &mut flow, &mut outbound, payer, 1).unwrap();
        assert_eq!(t, FlowTransition::CheckedIn);
        assert_eq!(outbound.rate, 1);
        assert!(gate.is_active_user(&payer));
        assert!(router.is_checked_in(&payer));

        let t = settle(&mut gate, &mut router, &mut flow, &mut outbound, payer, 0).unwrap();
        assert_eq!(t, FlowTransition::CheckedOut);
        assert_eq!(outbound.rate, 0);
        assert!(!gate.is_active_user(&payer));
        assert!(!flow.is_open());
    }

    #[test]
    fn two_payers_aggregate_independently() {
        let (mut gate, mut router, mut outbound, token) = fixtures(3);
        let ant = Pubkey::new_unique();
        let beetle = Pubkey::new_unique();
        let mut ant_flow = inbound(token, ant);
        let mut beetle_flow = inbound(token, beetle);

        settle(&mut gate, &mut router, &mut ant_flow, &mut outbound, ant, 3).unwrap();
        settle(&mut gate, &mut router, &mut beetle_flow, &mut outbound, beetle, 3).unwrap();
        assert_eq!(outbound.rate, 6);

        // checking one payer out leaves the other unaffected
        settle(&mut gate, &mut router, &mut ant_flow, &mut outbound, ant, 0).unwrap();
        assert_eq!(outbound.rate, 3);
        assert!(router.is_checked_in(&beetle));

        settle(&mut gate, &mut router, &mut beetle_flow, &mut outbound, beetle, 0).unwrap();
        assert_eq!(outbound.rate, 0);
    }

    #[test]
    fn mismatched_flow_never_registers() {
        let (mut gate, mut router, mut outbound, token) = fixtures(3);
        let payer = Pubkey::new_unique();
        let mut flow = inbound(token, payer);

        // flow opened directly at the wrong rate persists but does not count
        let t = settle(&mut gate, &mut router, &mut flow, &mut outbound, payer, 5).unwrap();
        assert_eq!(t, FlowTransition::Unchanged);
        assert_eq!(flow.rate, 5);
        assert!(!router.is_checked_in(&payer));
        assert_eq!(outbound.rate, 0);
    }

    #[test]
    fn rate_drift_drops_the_check_in_but_keeps_the_flow() {
        let (mut gate, mut router, mut outbound, token) = fixtures(3);
        let payer = Pubkey::new_unique();
        let mut flow = inbound(token, payer);

        settle(&mut gate, &mut router, &mut flow, &mut outbound, payer, 3).unwrap();
        assert_eq!(outbound.rate, 3);

        // payer updates the flow to a partial rate: implicit check-out,
        // the flow is left as the payer set it
        let t = settle(&mut gate, &mut router, &mut flow, &mut outbound, payer, 2).unwrap();
        assert_eq!(t, FlowTransition::CheckedOut);
        assert_eq!(flow.rate, 2);
        assert!(!router.is_checked_in(&payer));
        assert_eq!(outbound.rate, 0);
    }

    #[test]
    fn update_back_to_the_gate_rate_is_an_implicit_check_in() {
        let (mut gate, mut router, mut outbound, token) = fixtures(3);
        let payer = Pubkey::new_unique();
        let mut flow = inbound(token, payer);

        settle(&mut gate, &mut router, &mut flow, &mut outbound, payer, 5).unwrap();
        assert!(!router.is_checked_in(&payer));

        let t = settle(&mut gate, &mut router, &mut flow, &mut outbound, payer, 3).unwrap();
        assert_eq!(t, FlowTransition::CheckedIn);
        assert_eq!(outbound.rate, 3);
    }

    #[test]
    fn router_out_rate_mirrors_the_outbound_flow() {
        let (mut gate, mut router, mut outbound, token) = fixtures(3);
        let payer = Pubkey::new_unique();
        let mut flow = inbound(token, payer);

        settle(&mut gate, &mut router, &mut flow, &mut outbound, payer, 3).unwrap();
        assert_eq!(router.out_rate, 3);
        assert_eq!(router.out_rate, outbound.rate);

        settle(&mut gate, &mut router, &mut flow, &mut outbound, payer, 0).unwrap();
        assert_eq!(router.out_rate, 0);
        assert_eq!(router.out_rate, outbound.rate);
    }

    #[test]
    fn settlement_is_idempotent_for_a_matching_flow() {
        let (mut gate, mut router, mut outbound, token) = fixtures(2);
        let payer = Pubkey::new_unique();
        let mut flow = inbound(token, payer);

        settle(&mut gate, &mut router, &mut flow, &mut outbound, payer, 2).unwrap();
        let t = settle(&mut gate, &mut router, &mut flow, &mut outbound, payer, 2).unwrap();
        assert_eq!(t, FlowTransition::Unchanged);
        assert_eq!(outbound.rate, 2);
        assert_eq!(gate.active_users.len(), 1);
    }
}
