use crate::corpus::Instance;
use crate::error::WsdError;
use crate::rng::SenseRng;

/// Deterministic round-robin split: instance `i` lands in the first part
/// iff `i % n < p`, so the first part holds `p/n` of the data.
pub fn data_split(
    instances: Vec<Instance>,
    p: usize,
    n: usize,
) -> Result<(Vec<Instance>, Vec<Instance>), WsdError> {
    if n == 0 {
        return Err(WsdError::InvalidSplit);
    }
    let mut part1 = Vec::new();
    let mut part2 = Vec::new();
    for (i, instance) in instances.into_iter().enumerate() {
        if i % n < p {
            part1.push(instance);
        } else {
            part2.push(instance);
        }
    }
    Ok((part1, part2))
}

/// Shuffle with the caller's generator, then split round-robin.
pub fn random_data_split(
    mut instances: Vec<Instance>,
    p: usize,
    n: usize,
    rng: &mut SenseRng,
) -> Result<(Vec<Instance>, Vec<Instance>), WsdError> {
    if n == 0 {
        return Err(WsdError::InvalidSplit);
    }
    rng.shuffle(&mut instances);
    data_split(instances, p, n)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(count: usize) -> Vec<Instance> {
        (0..count)
            .map(|i| Instance::new(format!("i{i}"), "crane", "crane%bird", vec![], vec![]))
            .collect()
    }

    fn ids(instances: &[Instance]) -> Vec<String> {
        instances.iter().map(|i| i.id.clone()).collect()
    }

    #[test]
    fn round_robin_partitions_by_index() {
        let (part1, part2) = data_split(numbered(10), 1, 5).expect("split");
        assert_eq!(ids(&part1), vec!["i0", "i5"]);
        assert_eq!(
            ids(&part2),
            vec!["i1", "i2", "i3", "i4", "i6", "i7", "i8", "i9"]
        );
    }

    #[test]
    fn p_of_zero_sends_everything_to_part2() {
        let (part1, part2) = data_split(numbered(4), 0, 5).expect("split");
        assert!(part1.is_empty());
        assert_eq!(part2.len(), 4);
    }

    #[test]
    fn p_at_least_n_sends_everything_to_part1() {
        let (part1, part2) = data_split(numbered(4), 5, 5).expect("split");
        assert_eq!(part1.len(), 4);
        assert!(part2.is_empty());
    }

    #[test]
    fn zero_denominator_is_an_error() {
        assert!(matches!(
            data_split(numbered(3), 1, 0),
            Err(WsdError::InvalidSplit)
        ));
        let mut rng = SenseRng::new(1);
        assert!(matches!(
            random_data_split(numbered(3), 1, 0, &mut rng),
            Err(WsdError::InvalidSplit)
        ));
    }

    #[test]
    fn random_split_preserves_instances_and_proportions() {
        let mut rng = SenseRng::new(123);
        let (part1, part2) = random_data_split(numbered(20), 1, 10, &mut rng).expect("split");
        assert_eq!(part1.len(), 2);
        assert_eq!(part2.len(), 18);

        let mut all = ids(&part1);
        all.extend(ids(&part2));
        all.sort();
        let mut expected = ids(&numbered(20));
        expected.sort();
        assert_eq!(all, expected);
    }

    #[test]
    fn random_split_is_reproducible_per_seed() {
        let mut rng_a = SenseRng::new(7);
        let mut rng_b = SenseRng::new(7);
        let (a1, a2) = random_data_split(numbered(15), 1, 5, &mut rng_a).expect("split");
        let (b1, b2) = random_data_split(numbered(15), 1, 5, &mut rng_b).expect("split");
        assert_eq!(ids(&a1), ids(&b1));
        assert_eq!(ids(&a2), ids(&b2));
    }
}
