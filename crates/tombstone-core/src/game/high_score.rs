use strum::{Display, EnumString, IntoStaticStr};
use tracing::info;

use super::context::GameContext;
use crate::settings::SettingsBackend;

/// Decides whether a final score earns a place in a high-score table
pub trait HighScoreQualifier {
    fn score_qualifies(&self, score: i32) -> bool;
}

impl<F: Fn(i32) -> bool> HighScoreQualifier for F {
    fn score_qualifies(&self, score: i32) -> bool {
        self(score)
    }
}

/// Page to show once a game has ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, IntoStaticStr, Display)]
pub enum TargetPage {
    /// Score qualified: ask for the player's name
    HighScoreName,
    HighScores,
}

/// Finish the current game and pick the next page.
///
/// The game state is kept (inactive) so its final score stays readable.
pub fn end_game<B, Q>(ctx: &mut GameContext<B>, qualifier: &Q) -> TargetPage
where
    B: SettingsBackend,
    Q: HighScoreQualifier + ?Sized,
{
    let state = ctx.game_state();
    state.is_game_active = false;
    let score = state.score;

    let target = if qualifier.score_qualifies(score) {
        TargetPage::HighScoreName
    } else {
        TargetPage::HighScores
    };
    info!("Game ended with score {}, next page: {}", score, target);
    target
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::SessionPhase;
    use crate::settings::MemoryBackend;

    struct MinimumScore(i32);

    impl HighScoreQualifier for MinimumScore {
        fn score_qualifies(&self, score: i32) -> bool {
            score >= self.0
        }
    }

    fn active_context(score: i32) -> GameContext<MemoryBackend> {
        let mut ctx = GameContext::with_backend(MemoryBackend::new());
        ctx.start_new_game().score = score;
        ctx
    }

    #[test]
    fn test_qualifying_score_asks_for_name() {
        let mut ctx = active_context(5000);
        assert_eq!(end_game(&mut ctx, &MinimumScore(1000)), TargetPage::HighScoreName);
    }

    #[test]
    fn test_low_score_goes_to_table() {
        let mut ctx = active_context(10);
        assert_eq!(end_game(&mut ctx, &MinimumScore(1000)), TargetPage::HighScores);
    }

    #[test]
    fn test_state_survives_end_of_game() {
        let mut ctx = active_context(750);
        assert_eq!(ctx.phase(), SessionPhase::Active);

        end_game(&mut ctx, &|score: i32| score > 0);
        assert_eq!(ctx.phase(), SessionPhase::Ended);
        assert_eq!(ctx.game_state().score, 750);
    }
}
