//! Play materialization and persistence hand-off
//!
//! A `GeneratedPlay` carries no geometry. Once a coach confirms a selection,
//! each selected play is expanded into a `PlayDocument` (fresh roster, built
//! actions, metadata) and handed to a [`PlaySink`].

use crate::builder::ActionBuilder;
use crate::catalog::FormationLookup;
use crate::error::{PlaybookError, Result};
use crate::models::{GeneratedPlay, PlayDocument, PlayMeta};
use crate::provider::{Clock, IdProvider};

/// Expand one play into a full document.
///
/// Returns `None` when the play's formation is no longer in the lookup. A
/// builder failure does not fail the play: it is logged and the document is
/// emitted with no actions.
pub fn materialize_play(
    play: &GeneratedPlay,
    lookup: &dyn FormationLookup,
    builder: &ActionBuilder<'_>,
    ids: &mut dyn IdProvider,
    clock: &dyn Clock,
) -> Option<PlayDocument> {
    let Some(spec) = lookup.formation(&play.formation_key) else {
        tracing::warn!(play = %play.id, formation = %play.formation_key, "formation missing, cannot materialize");
        return None;
    };

    let roster = spec.roster(ids);
    let actions = match builder.build(&play.concept, &roster) {
        Ok(output) => output.actions,
        Err(e) => {
            tracing::warn!(play = %play.id, concept = %play.concept.id, error = %e, "action build failed");
            Vec::new()
        }
    };

    Some(PlayDocument {
        roster,
        actions,
        meta: PlayMeta {
            play_id: play.id.clone(),
            name: play.name.clone(),
            formation_key: play.formation_key.clone(),
            concept_id: play.concept.id.clone(),
            concept_type: play.concept_type(),
            score: play.score,
            rationale: play.rationale.clone(),
            created_at: clock.now(),
        },
    })
}

/// Materialize every selected play, preserving order
pub fn materialize_selected(
    plays: &[GeneratedPlay],
    lookup: &dyn FormationLookup,
    builder: &ActionBuilder<'_>,
    ids: &mut dyn IdProvider,
    clock: &dyn Clock,
) -> Vec<PlayDocument> {
    plays
        .iter()
        .filter(|p| p.selected)
        .filter_map(|p| materialize_play(p, lookup, builder, ids, clock))
        .collect()
}

/// Destination for confirmed plays
pub trait PlaySink {
    fn create_play(&mut self, doc: PlayDocument) -> Result<()>;
}

/// Keeps created plays in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    pub plays: Vec<PlayDocument>,
}

impl PlaySink for MemorySink {
    fn create_play(&mut self, doc: PlayDocument) -> Result<()> {
        if self.plays.iter().any(|p| p.meta.play_id == doc.meta.play_id) {
            return Err(PlaybookError::InvalidRequest(format!(
                "play {} already created",
                doc.meta.play_id
            )));
        }
        self.plays.push(doc);
        Ok(())
    }
}

/// Materialize selected plays and hand each to `sink`. Returns how many were created.
pub fn save_selected(
    plays: &[GeneratedPlay],
    lookup: &dyn FormationLookup,
    builder: &ActionBuilder<'_>,
    ids: &mut dyn IdProvider,
    clock: &dyn Clock,
    sink: &mut dyn PlaySink,
) -> Result<usize> {
    let docs = materialize_selected(plays, lookup, builder, ids, clock);
    let count = docs.len();
    for doc in docs {
        sink.create_play(doc)?;
    }
    tracing::info!(created = count, "saved selected plays");
    Ok(count)
}
