//! Eligibility and ranking policy.
//!
//! One component parameterized by a variant tag. All three behaviors share
//! the same qualification test (close above the moving average) and the same
//! rounding rules; they differ only in filtering, ordering and annotation.

use std::cmp::Ordering;
use std::str::FromStr;

use crate::common::math::round_dp;
use crate::models::RankedEntry;
use crate::screener::engine::SymbolIndicators;

pub const RECOMMEND_BUY: &str = "buy";
pub const RECOMMEND_HOLD_OFF: &str = "do not buy";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyVariant {
    /// Keep only uptrend symbols, rank by return descending, take the top N.
    FilterThenRank,
    /// Rank all computable symbols by return descending, take the top N,
    /// annotate each with its qualification flag.
    RankThenAnnotate,
    /// No ranking or truncation: report every computable symbol in scan
    /// order with a buy / do-not-buy recommendation.
    ClassifyAll,
}

impl FromStr for PolicyVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "filter_then_rank" => Ok(Self::FilterThenRank),
            "rank_then_annotate" => Ok(Self::RankThenAnnotate),
            "classify_all" => Ok(Self::ClassifyAll),
            other => Err(format!("unknown policy variant '{}'", other)),
        }
    }
}

/// Build the ordered entry list for one cycle from the evaluated symbols,
/// which must be in watchlist scan order.
///
/// Sorting compares the unrounded return so that rounding can never
/// reorder entries; ties keep scan order (the sort is stable). Fewer than
/// `top_n` qualifiers yield fewer entries, never padding.
pub fn build_entries(
    results: Vec<SymbolIndicators>,
    variant: PolicyVariant,
    top_n: usize,
) -> Vec<RankedEntry> {
    match variant {
        PolicyVariant::FilterThenRank => {
            let mut kept: Vec<SymbolIndicators> =
                results.into_iter().filter(|r| r.qualifies()).collect();
            sort_by_return_desc(&mut kept);
            kept.truncate(top_n);
            kept.iter().map(|r| to_entry(r)).collect()
        }
        PolicyVariant::RankThenAnnotate => {
            let mut kept = results;
            sort_by_return_desc(&mut kept);
            kept.truncate(top_n);
            kept.iter()
                .map(|r| {
                    let mut entry = to_entry(r);
                    entry.qualifies = Some(r.qualifies());
                    entry
                })
                .collect()
        }
        PolicyVariant::ClassifyAll => results
            .iter()
            .map(|r| {
                let mut entry = to_entry(r);
                let label = if r.qualifies() {
                    RECOMMEND_BUY
                } else {
                    RECOMMEND_HOLD_OFF
                };
                entry.recommendation = Some(label.to_string());
                entry
            })
            .collect(),
    }
}

fn sort_by_return_desc(results: &mut [SymbolIndicators]) {
    // sort_by is stable, so equal returns preserve scan order.
    results.sort_by(|a, b| b.ret.partial_cmp(&a.ret).unwrap_or(Ordering::Equal));
}

fn to_entry(r: &SymbolIndicators) -> RankedEntry {
    RankedEntry {
        symbol: r.symbol.clone(),
        price: round_dp(r.close, 2),
        moving_average: round_dp(r.sma, 2),
        ret: round_dp(r.ret, 4),
        qualifies: None,
        recommendation: None,
    }
}
