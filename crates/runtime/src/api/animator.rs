//! Presentation collaborator awaited after every executed action.
use async_trait::async_trait;
use combat_core::AnimationBatch;
use tokio::sync::Mutex;

/// Plays an animation batch and returns once it has finished.
///
/// The executor does not resolve the next action until `animate` returns.
#[async_trait]
pub trait Animator: Send + Sync {
    async fn animate(&self, batch: &AnimationBatch);
}

/// Completes immediately.
pub struct InstantAnimator;

#[async_trait]
impl Animator for InstantAnimator {
    async fn animate(&self, _batch: &AnimationBatch) {}
}

/// Keeps every batch it was asked to play.
#[derive(Default)]
pub struct RecordingAnimator {
    batches: Mutex<Vec<AnimationBatch>>,
}

impl RecordingAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn batches(&self) -> Vec<AnimationBatch> {
        self.batches.lock().await.clone()
    }
}

#[async_trait]
impl Animator for RecordingAnimator {
    async fn animate(&self, batch: &AnimationBatch) {
        self.batches.lock().await.push(batch.clone());
    }
}

#[async_trait]
impl<A: Animator + ?Sized> Animator for std::sync::Arc<A> {
    async fn animate(&self, batch: &AnimationBatch) {
        (**self).animate(batch).await
    }
}
