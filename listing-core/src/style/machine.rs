//! Persist-before-accept state machine for one post's canvas style.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::model::PostType;
use crate::templates::TemplateRegistry;

use super::persistence::StylePersistence;
use super::{merge_persisted, CanvasStyle, StyleMutation};

/// Where the machine is in the mutation lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StylePhase {
    /// No post loaded.
    Uninitialized,
    /// Defaults or restored style, nothing edited yet.
    Default,
    /// At least one mutation awaits its persistence outcome.
    Pending,
    /// The most recent outcome was a successful save.
    Confirmed,
    /// The most recent outcome was a failed save.
    Rejected,
}

/// Identifies one submitted mutation.
///
/// Tickets carry the initialization generation they were issued in, so
/// outcomes that arrive after the machine moved to another post are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MutationTicket {
    generation: u64,
    seq: u64,
}

impl MutationTicket {
    /// Submission order within the current post.
    #[must_use]
    pub const fn seq(&self) -> u64 {
        self.seq
    }
}

/// A mutation handed to the caller for persistence.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingMutation {
    /// Pass back to `on_persist_success` / `on_persist_failure`.
    pub ticket: MutationTicket,
    /// The style as it will be once this and every earlier mutation is saved.
    pub candidate: CanvasStyle,
    /// Flat JSON to submit.
    pub patch: Value,
}

#[derive(Debug, Clone)]
enum Outcome {
    Saved,
    Failed(String),
}

#[derive(Debug, Clone)]
struct InFlight {
    seq: u64,
    mutation: StyleMutation,
    outcome: Option<Outcome>,
}

#[derive(Debug, Clone)]
struct ActivePost {
    post_id: String,
    post_type: PostType,
}

/// Owns the confirmed style of one post at a time.
///
/// A mutation never touches the confirmed style directly: it is queued,
/// handed out for persistence, and folded in only when its save succeeds.
/// Outcomes are applied strictly in submission order; an outcome for a later
/// mutation is held until every earlier one has resolved.
#[derive(Debug)]
pub struct StyleMachine<'r> {
    registry: &'r TemplateRegistry,
    config: &'r EngineConfig,
    phase: StylePhase,
    post: Option<ActivePost>,
    confirmed: Option<CanvasStyle>,
    generation: u64,
    next_seq: u64,
    in_flight: VecDeque<InFlight>,
    last_error: Option<String>,
}

impl<'r> StyleMachine<'r> {
    /// Create an uninitialized machine.
    #[must_use]
    pub fn new(registry: &'r TemplateRegistry, config: &'r EngineConfig) -> Self {
        Self {
            registry,
            config,
            phase: StylePhase::Uninitialized,
            post: None,
            confirmed: None,
            generation: 0,
            next_seq: 0,
            in_flight: VecDeque::new(),
            last_error: None,
        }
    }

    /// Load defaults for a post that has no stored style.
    ///
    /// Any mutation still in flight for a previous post is abandoned.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownTemplate`] if the registry offers nothing
    /// for `post_type`.
    pub fn initialize(
        &mut self,
        post_id: impl Into<String>,
        post_type: PostType,
    ) -> EngineResult<&CanvasStyle> {
        let style = CanvasStyle::initial(post_type, self.registry, self.config)?;
        Ok(self.load(post_id.into(), post_type, style))
    }

    /// Load a stored flat record for a post.
    ///
    /// Absent keys take the [`initialize`](Self::initialize) defaults and
    /// unknown keys are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidHex`] for a malformed stored color and
    /// [`EngineError::UnknownTemplate`] if the stored template is not offered
    /// for `post_type`. The machine is left unchanged on error.
    pub fn restore(
        &mut self,
        post_id: impl Into<String>,
        post_type: PostType,
        stored: &Value,
    ) -> EngineResult<&CanvasStyle> {
        let defaults = CanvasStyle::initial(post_type, self.registry, self.config)?;
        let style = merge_persisted(defaults, stored)?;
        self.check_template(post_type, &style.template_id)?;
        Ok(self.load(post_id.into(), post_type, style))
    }

    fn load(&mut self, post_id: String, post_type: PostType, style: CanvasStyle) -> &CanvasStyle {
        if !self.in_flight.is_empty() {
            tracing::debug!(
                abandoned = self.in_flight.len(),
                "Dropping in-flight style mutations"
            );
        }
        self.generation += 1;
        self.next_seq = 0;
        self.in_flight.clear();
        self.last_error = None;
        self.phase = StylePhase::Default;
        tracing::debug!(%post_id, %post_type, template = %style.template_id, "Canvas style loaded");
        self.post = Some(ActivePost { post_id, post_type });
        self.confirmed.insert(style)
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> StylePhase {
        self.phase
    }

    /// Post the machine is loaded for.
    #[must_use]
    pub fn post_id(&self) -> Option<&str> {
        self.post.as_ref().map(|p| p.post_id.as_str())
    }

    /// The last persisted style.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NotInitialized`] before the first load.
    pub fn confirmed(&self) -> EngineResult<&CanvasStyle> {
        self.confirmed.as_ref().ok_or(EngineError::NotInitialized)
    }

    /// Reason of the most recent failed save.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Number of mutations awaiting an outcome.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.in_flight.len()
    }

    /// Flat key/value form of the confirmed style.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NotInitialized`] before the first load.
    pub fn to_persisted_json(&self) -> EngineResult<Value> {
        self.confirmed()?.to_persisted_json()
    }

    /// Queue a mutation for persistence.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NotInitialized`] before the first load and
    /// [`EngineError::UnknownTemplate`] for a template not offered for the
    /// post type; in both cases nothing is queued.
    pub fn mutate(&mut self, mutation: StyleMutation) -> EngineResult<PendingMutation> {
        let post_type = self
            .post
            .as_ref()
            .map(|p| p.post_type)
            .ok_or(EngineError::NotInitialized)?;
        if let StyleMutation::TemplateId(id) = &mutation {
            self.check_template(post_type, id)?;
        }

        let mut candidate = self.projected()?;
        mutation.apply(&mut candidate);

        let ticket = MutationTicket {
            generation: self.generation,
            seq: self.next_seq,
        };
        self.next_seq += 1;
        let patch = mutation.patch();
        tracing::debug!(field = mutation.field(), seq = ticket.seq, "Style mutation submitted");
        self.in_flight.push_back(InFlight {
            seq: ticket.seq,
            mutation,
            outcome: None,
        });
        self.phase = StylePhase::Pending;

        Ok(PendingMutation {
            ticket,
            candidate,
            patch,
        })
    }

    /// Record that the mutation behind `ticket` was saved.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NotInitialized`] before the first load.
    pub fn on_persist_success(&mut self, ticket: MutationTicket) -> EngineResult<()> {
        self.resolve(ticket, Outcome::Saved)
    }

    /// Record that the mutation behind `ticket` could not be saved.
    ///
    /// The confirmed style is left as it was.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NotInitialized`] before the first load.
    pub fn on_persist_failure(
        &mut self,
        ticket: MutationTicket,
        reason: impl Into<String>,
    ) -> EngineResult<()> {
        self.resolve(ticket, Outcome::Failed(reason.into()))
    }

    /// Mutate, save through `persistence`, then apply the outcome.
    ///
    /// # Errors
    ///
    /// Returns the [`mutate`](Self::mutate) errors, or
    /// [`EngineError::PersistenceFailure`] when the save fails.
    pub async fn commit(
        &mut self,
        persistence: &dyn StylePersistence,
        mutation: StyleMutation,
    ) -> EngineResult<&CanvasStyle> {
        let pending = self.mutate(mutation)?;
        let post_id = self
            .post_id()
            .map(str::to_string)
            .ok_or(EngineError::NotInitialized)?;

        match persistence.save(&post_id, &pending.patch).await {
            Ok(()) => {
                self.on_persist_success(pending.ticket)?;
                self.confirmed()
            }
            Err(err) => {
                let reason = err.to_string();
                self.on_persist_failure(pending.ticket, reason.clone())?;
                Err(EngineError::PersistenceFailure(reason))
            }
        }
    }

    fn resolve(&mut self, ticket: MutationTicket, outcome: Outcome) -> EngineResult<()> {
        if self.confirmed.is_none() {
            return Err(EngineError::NotInitialized);
        }
        if ticket.generation != self.generation {
            tracing::warn!(seq = ticket.seq, "Ignoring persistence outcome for a previous post");
            return Ok(());
        }
        let Some(entry) = self
            .in_flight
            .iter_mut()
            .find(|entry| entry.seq == ticket.seq && entry.outcome.is_none())
        else {
            tracing::warn!(seq = ticket.seq, "Ignoring duplicate persistence outcome");
            return Ok(());
        };
        entry.outcome = Some(outcome);
        self.drain()
    }

    /// Apply resolved outcomes from the front of the queue.
    fn drain(&mut self) -> EngineResult<()> {
        while self
            .in_flight
            .front()
            .is_some_and(|entry| entry.outcome.is_some())
        {
            let Some(InFlight {
                seq,
                mutation,
                outcome: Some(outcome),
            }) = self.in_flight.pop_front()
            else {
                break;
            };

            match outcome {
                Outcome::Saved => {
                    let confirmed = self.confirmed.as_mut().ok_or(EngineError::NotInitialized)?;
                    mutation.apply(confirmed);
                    self.phase = StylePhase::Confirmed;
                    tracing::debug!(field = mutation.field(), seq, "Style mutation confirmed");
                }
                Outcome::Failed(reason) => {
                    tracing::warn!(field = mutation.field(), seq, %reason, "Style mutation rejected");
                    self.last_error = Some(reason);
                    self.phase = StylePhase::Rejected;
                }
            }
        }
        if !self.in_flight.is_empty() {
            self.phase = StylePhase::Pending;
        }
        Ok(())
    }

    /// Confirmed style plus every queued mutation not known to have failed.
    fn projected(&self) -> EngineResult<CanvasStyle> {
        let mut style = self.confirmed()?.clone();
        for entry in &self.in_flight {
            if !matches!(entry.outcome, Some(Outcome::Failed(_))) {
                entry.mutation.apply(&mut style);
            }
        }
        Ok(style)
    }

    fn check_template(&self, post_type: PostType, id: &str) -> EngineResult<()> {
        if self.registry.contains(post_type, id) {
            Ok(())
        } else {
            Err(EngineError::UnknownTemplate {
                id: id.to_string(),
                post_type,
            })
        }
    }
}
