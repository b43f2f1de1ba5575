//! Action selection for the four strategies.

use pd_events::{Action, Strategy};

use crate::components::Agent;

/// Move `agent` makes against `partner`, before noise.
///
/// Tit-for-tat reads the partner's most recent action against anyone, not
/// against this agent specifically.
pub fn choose_action(agent: &Agent, partner: &Agent) -> Action {
    match agent.strategy {
        Strategy::AlwaysCooperate => Action::Cooperate,
        Strategy::AlwaysDefect => Action::Defect,
        Strategy::TitForTat => partner.last_action,
        Strategy::Grudger => {
            if agent.grudged {
                Action::Defect
            } else {
                Action::Cooperate
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn partner(last: Action) -> Agent {
        let mut a = Agent::new(Strategy::AlwaysCooperate);
        a.last_action = last;
        a
    }

    #[test]
    fn test_unconditional_strategies() {
        let allc = Agent::new(Strategy::AlwaysCooperate);
        let alld = Agent::new(Strategy::AlwaysDefect);
        for last in [Action::Cooperate, Action::Defect] {
            assert_eq!(choose_action(&allc, &partner(last)), Action::Cooperate);
            assert_eq!(choose_action(&alld, &partner(last)), Action::Defect);
        }
    }

    #[test]
    fn test_tit_for_tat_mirrors_partner() {
        let tft = Agent::new(Strategy::TitForTat);
        assert_eq!(choose_action(&tft, &partner(Action::Cooperate)), Action::Cooperate);
        assert_eq!(choose_action(&tft, &partner(Action::Defect)), Action::Defect);
    }

    #[test]
    fn test_tit_for_tat_ignores_own_grudge() {
        let mut tft = Agent::new(Strategy::TitForTat);
        tft.grudged = true;
        assert_eq!(choose_action(&tft, &partner(Action::Cooperate)), Action::Cooperate);
    }

    #[test]
    fn test_grudger() {
        let mut grudger = Agent::new(Strategy::Grudger);
        assert_eq!(choose_action(&grudger, &partner(Action::Defect)), Action::Cooperate);
        grudger.grudged = true;
        assert_eq!(choose_action(&grudger, &partner(Action::Cooperate)), Action::Defect);
    }
}
