//! Player-interop effects.

use super::EffectContext;
use crate::errors::ErrorContext;
use crate::state::PlayerState;
use tracing::instrument;

/// Asks the player collaborator to load whatever the reducer put into
/// `Player::Loading`. A no-op in any other player state.
#[instrument(skip(ctx))]
pub(super) async fn load_current(ctx: &EffectContext) {
    if let PlayerState::Loading { video_id, autoplay } = ctx.state().player {
        if let Err(error) = ctx.collaborators.player.load(&video_id, autoplay).await {
            ctx.fail(error, ErrorContext::new("player_load"));
        }
    }
}
