use super::Candidate;
use thiserror::Error;

/// No candidate survived selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no sidebar-like element found")]
pub struct NoCandidateFound;

/// How a candidate fared in selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Contains "On this page"; a table of contents, not the sidebar
    ExcludedToc,
    /// Lacks "Navigation" while another remaining candidate has it
    NoNavigationText,
    /// In the final pool, ranked by internal link count
    Eligible,
}

/// Apply the exclusion and preference steps to each candidate.
///
/// TOC exclusion is skipped when every candidate is a TOC, so the pool
/// never empties on that step alone.
pub fn assess(candidates: &[Candidate<'_>]) -> Vec<Verdict> {
    let drop_toc = candidates.iter().any(|c| !c.contains_on_this_page_text);
    let excluded = |c: &Candidate<'_>| drop_toc && c.contains_on_this_page_text;
    let prefer_navigation = candidates
        .iter()
        .any(|c| !excluded(c) && c.contains_navigation_text);

    candidates
        .iter()
        .map(|c| {
            if excluded(c) {
                Verdict::ExcludedToc
            } else if prefer_navigation && !c.contains_navigation_text {
                Verdict::NoNavigationText
            } else {
                Verdict::Eligible
            }
        })
        .collect()
}

/// Pick the sidebar from the candidates.
///
/// Among eligible candidates the highest `internal_link_count` wins; ties
/// go to the earliest candidate.
pub fn select_best(candidates: Vec<Candidate<'_>>) -> Result<Candidate<'_>, NoCandidateFound> {
    let verdicts = assess(&candidates);

    let mut best: Option<usize> = None;
    for (index, (candidate, verdict)) in candidates.iter().zip(&verdicts).enumerate() {
        ::log::debug!("Candidate {}: {} -> {:?}", index, candidate, verdict);
        if *verdict != Verdict::Eligible {
            continue;
        }
        match best {
            Some(b) if candidates[b].internal_link_count >= candidate.internal_link_count => {}
            _ => best = Some(index),
        }
    }

    let index = best.ok_or(NoCandidateFound)?;
    let chosen = candidates
        .into_iter()
        .nth(index)
        .ok_or(NoCandidateFound)?;
    ::log::info!("Selected sidebar: {}", chosen);
    Ok(chosen)
}
