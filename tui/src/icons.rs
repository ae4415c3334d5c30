use rand::Rng;

/// Decorative glyphs shown next to a freshly generated deck's title.
pub const DECOR_ICONS: [&str; 9] = ["📄", "💡", "💬", "🚀", "✨", "⭐", "🔖", "🎨", "📝"];

/// Pick one decorative icon. The caller owns the randomness, so a seeded
/// source gives a fixed result.
pub fn pick_icon<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    DECOR_ICONS[rng.random_range(0..DECOR_ICONS.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn same_seed_same_icon() {
        let a = pick_icon(&mut StdRng::seed_from_u64(42));
        let b = pick_icon(&mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
        assert!(DECOR_ICONS.contains(&a));
    }

    #[test]
    fn every_icon_is_reachable() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            seen.insert(pick_icon(&mut rng));
        }
        assert_eq!(seen.len(), DECOR_ICONS.len());
    }
}
