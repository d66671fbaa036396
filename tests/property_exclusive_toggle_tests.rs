use chart_overlays::interaction::{SELECTED_CLASS, exclusive_toggle};
use chart_overlays::surface::{MemorySurface, Surface};
use proptest::prelude::*;

proptest! {
    #[test]
    fn exactly_one_selected_when_the_marker_targets_a_member(
        count in 1usize..24,
        target in 0usize..24,
        previous in 0usize..24
    ) {
        let target = target % count;
        let previous = previous % count;

        let mut surface = MemorySurface::new();
        let root = surface.root();
        let items: Vec<_> = (0..count)
            .map(|index| surface.append_child(root, &format!("item item-b{index}")))
            .collect();

        // whatever selection held before must not survive the transition
        exclusive_toggle(&mut surface, &items, &format!("item-b{previous}"));
        exclusive_toggle(&mut surface, &items, &format!("item-b{target}"));

        let selected: Vec<usize> = (0..count)
            .filter(|index| surface.has_class(items[*index], SELECTED_CLASS))
            .collect();
        prop_assert_eq!(selected, vec![target]);
    }

    #[test]
    fn no_member_selected_when_the_marker_matches_nothing(count in 1usize..24) {
        let mut surface = MemorySurface::new();
        let root = surface.root();
        let items: Vec<_> = (0..count)
            .map(|index| surface.append_child(root, &format!("item item-b{index}")))
            .collect();

        exclusive_toggle(&mut surface, &items, "item-missing");

        prop_assert!(items.iter().all(|item| !surface.has_class(*item, SELECTED_CLASS)));
    }
}
