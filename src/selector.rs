use crate::data::CourseKey;
use crate::error::{AllocationError, AllocationResult};
use crate::pools::CoursePools;
use crate::strategy::Strategy;
use itertools::Itertools;
use rand::Rng;
use rand::seq::{SliceRandom, index};

/// Chooses the courses a single room will draw from, in draw order.
///
/// `available` must only hold courses with pending records. An empty
/// `available` yields an empty selection. `max_courses` must be positive for
/// the multi-course strategies and is ignored by course-wise.
///
/// Balanced shuffles every tie bucket it reaches before truncating, so the
/// generator advances once per bucket up to the limit. Smart shuffles the
/// sampled courses again, which decides the draw order within the room.
pub fn select_courses<R>(
    available: &[CourseKey],
    pools: &CoursePools,
    strategy: Strategy,
    max_courses: usize,
    rng: &mut R,
) -> AllocationResult<Vec<CourseKey>>
where
    R: Rng + ?Sized,
{
    if strategy.is_multi_course() && max_courses == 0 {
        return Err(AllocationError::InvalidMaxCourses(strategy.as_str()));
    }
    if available.is_empty() {
        return Ok(Vec::new());
    }

    let selected: Vec<CourseKey> = match strategy {
        Strategy::CourseWise => largest_first_seen(available, pools).into_iter().collect(),
        Strategy::Balanced => largest_with_shuffled_ties(available, pools, max_courses, rng),
        Strategy::Smart => random_mix(available, max_courses, rng),
    };
    Ok(selected)
}

// Ties on the maximum go to the earliest course in pool order.
fn largest_first_seen(available: &[CourseKey], pools: &CoursePools) -> Option<CourseKey> {
    let mut best: Option<(&CourseKey, usize)> = None;
    for key in available {
        let size = pools.pending(key);
        if best.is_none_or(|(_, best_size)| size > best_size) {
            best = Some((key, size));
        }
    }
    best.map(|(key, _)| key.clone())
}

fn largest_with_shuffled_ties<R>(
    available: &[CourseKey],
    pools: &CoursePools,
    max_courses: usize,
    rng: &mut R,
) -> Vec<CourseKey>
where
    R: Rng + ?Sized,
{
    let mut ordered: Vec<(usize, &CourseKey)> =
        available.iter().map(|key| (pools.pending(key), key)).collect();
    ordered.sort_by(|a, b| b.0.cmp(&a.0));

    let mut selected = Vec::with_capacity(max_courses.min(available.len()));
    let buckets = ordered.into_iter().chunk_by(|(size, _)| *size);
    for (_, tied) in &buckets {
        let mut tied: Vec<CourseKey> = tied.map(|(_, key)| key.clone()).collect();
        tied.shuffle(rng);
        selected.extend(tied);
        if selected.len() >= max_courses {
            break;
        }
    }
    selected.truncate(max_courses);
    selected
}

fn random_mix<R>(available: &[CourseKey], max_courses: usize, rng: &mut R) -> Vec<CourseKey>
where
    R: Rng + ?Sized,
{
    let limit = max_courses.min(available.len());
    let mut selected: Vec<CourseKey> = index::sample(rng, available.len(), limit)
        .into_iter()
        .map(|i| available[i].clone())
        .collect();
    selected.shuffle(rng);
    selected
}
