use precip_features::Neighborhoods;

use crate::Vote;

/// Inverse-distance weighted vote of one neighborhood.
///
/// Neighbors at distance zero (the point itself and exact duplicates) are
/// left out of the weighted sum. The first neighbor's seed is added once
/// more, unweighted, which biases the vote towards the nearest opinion even
/// when that neighbor is also inside the sum.
pub fn vote_score(seeds: &[Vote], indices: &[usize], distances: &[f64]) -> f64 {
    let weighted = { indices.iter().zip(distances) }
        .filter(|&(_, &distance)| distance > 0.0)
        .map(|(&j, &distance)| seeds[j].value() / distance)
        .sum::<f64>();
    let bias = indices.first().map_or(0.0, |&j| seeds[j].value());
    weighted + bias
}

/// Resolves every undecided seed by a vote over its cached neighborhood.
///
/// Votes read the seeds only, so the result does not depend on the order in
/// which undecided points are visited.
pub fn propagate(seeds: &[Vote], neighborhoods: &Neighborhoods<f64>) -> Vec<Vote> {
    debug_assert_eq!(seeds.len(), neighborhoods.len());
    { seeds.iter().zip(neighborhoods.iter()) }
        .map(|(&seed, (indices, distances))| match seed {
            Vote::Undecided => Vote::from_score(vote_score(seeds, indices, distances)),
            decided => decided,
        })
        .collect()
}
