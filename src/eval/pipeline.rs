use rayon::prelude::*;

use crate::{
    eval::evaluator::{EvaluatedFrame, Evaluator, PreparedScenario},
    eval::fingerprint::{FrameFingerprint, fingerprint_frame},
    foundation::core::{FrameIndex, FrameRange},
    foundation::error::{ShortsceneError, ShortsceneResult},
};

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// How [`eval_frames`] spreads work across threads.
pub struct EvalThreading {
    /// Use the rayon pool; frames are evaluated in order otherwise.
    pub parallel: bool,
    /// Frames handed to the pool per batch.
    pub chunk_size: usize,
    /// Worker count override; rayon's default when `None`.
    pub threads: Option<usize>,
}

impl Default for EvalThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 64,
            threads: None,
        }
    }
}

/// Evaluate `range` (start inclusive, end exclusive) in frame order.
///
/// Parallel and sequential runs return identical frames.
#[tracing::instrument(skip(prepared))]
pub fn eval_frames(
    prepared: &PreparedScenario,
    range: FrameRange,
    threading: &EvalThreading,
) -> ShortsceneResult<Vec<EvaluatedFrame>> {
    map_frames(prepared, range, threading, |f| Evaluator::eval_frame(prepared, f))
}

/// Like [`eval_frames`], keeping only each frame's fingerprint.
#[tracing::instrument(skip(prepared))]
pub fn fingerprint_frames(
    prepared: &PreparedScenario,
    range: FrameRange,
    threading: &EvalThreading,
) -> ShortsceneResult<Vec<FrameFingerprint>> {
    map_frames(prepared, range, threading, |f| {
        Evaluator::eval_frame(prepared, f).map(|frame| fingerprint_frame(&frame))
    })
}

fn map_frames<T, F>(
    prepared: &PreparedScenario,
    range: FrameRange,
    threading: &EvalThreading,
    f: F,
) -> ShortsceneResult<Vec<T>>
where
    T: Send,
    F: Fn(FrameIndex) -> ShortsceneResult<T> + Sync,
{
    if range.is_empty() {
        return Err(ShortsceneError::validation("eval range must be non-empty"));
    }
    if range.end.0 > prepared.duration_frames() {
        return Err(ShortsceneError::evaluation(format!(
            "eval range end {} exceeds duration {} frames",
            range.end.0,
            prepared.duration_frames()
        )));
    }

    if !threading.parallel {
        return (range.start.0..range.end.0)
            .map(|i| f(FrameIndex(i)))
            .collect();
    }

    let pool = build_thread_pool(threading.threads)?;
    let chunk_size = normalized_chunk_size(threading.chunk_size);
    let mut out = Vec::with_capacity(range.len_frames().min(4096) as usize);

    let mut chunk_start = range.start.0;
    while chunk_start < range.end.0 {
        let chunk_end = (chunk_start + chunk_size).min(range.end.0);
        let mut chunk = pool.install(|| {
            (chunk_start..chunk_end)
                .into_par_iter()
                .map(|i| f(FrameIndex(i)))
                .collect::<ShortsceneResult<Vec<_>>>()
        })?;
        out.append(&mut chunk);
        chunk_start = chunk_end;
    }
    tracing::debug!(frames = out.len(), "parallel evaluation finished");
    Ok(out)
}

fn build_thread_pool(threads: Option<usize>) -> ShortsceneResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(ShortsceneError::validation(
            "eval threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| ShortsceneError::evaluation(format!("failed to build rayon thread pool: {e}")))
}

fn normalized_chunk_size(chunk_size: usize) -> u64 {
    if chunk_size == 0 {
        1
    } else {
        chunk_size as u64
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/pipeline.rs"]
mod tests;
