//! Property tests for the resolution invariants: cleanup, containment and
//! idempotence over arbitrary candidate collections.

use chemtag::{key, Annotation, AnnotationCollection, Category, LookupTable, Resolver, Span};
use proptest::prelude::*;

const TEXT: &str = "Sodium chloride and iron oxide with Na, Fe and Cl traces";

fn element_map() -> LookupTable {
    LookupTable::from_reader("Na\nSodium\nFe\nIron\nCl\nChlorine\nO\nOxygen\n".as_bytes())
        .unwrap()
}

fn category() -> impl Strategy<Value = Category> {
    prop_oneof![
        Just(Category::RejectedCandidate),
        Just(Category::RawCompoundContextHit),
        Just(Category::RawElementHit),
        Just(Category::ElementMention),
        Just(Category::CompoundMention),
    ]
}

fn kind() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("symbol".to_string()),
        Just("name".to_string()),
        Just("formula".to_string()),
    ]
}

/// Spans over TEXT, a few of them deliberately past the end to exercise the
/// recoverable offset path.
fn span() -> impl Strategy<Value = Span> {
    (0usize..TEXT.len(), 0usize..20)
        .prop_map(|(start, len)| Span::new(start, (start + len).min(TEXT.len() + 10)))
}

fn annotation() -> impl Strategy<Value = Annotation> {
    (category(), span(), kind()).prop_map(|(category, span, kind)| {
        let ann = Annotation::new(category, span);
        if category == Category::ElementMention {
            ann.with_feature(key::KIND, kind)
        } else {
            ann
        }
    })
}

fn collection() -> impl Strategy<Value = AnnotationCollection> {
    prop::collection::vec(annotation(), 0..24).prop_map(AnnotationCollection::from_annotations)
}

proptest! {
    /// No rejected or raw-hit annotation ever appears in the output.
    #[test]
    fn cleanup_property(mut annotations in collection()) {
        let table = element_map();
        Resolver::new(&table).resolve(&mut annotations, TEXT);

        prop_assert!(annotations.iter().all(|a| a.category.is_mention()));
    }

    /// With removal enabled, no final element mention is fully contained in
    /// any final compound mention.
    #[test]
    fn containment_invariant(mut annotations in collection()) {
        let table = element_map();
        Resolver::new(&table).resolve(&mut annotations, TEXT);

        let compounds = annotations.spans_of(Category::CompoundMention);
        for mention in annotations.of_category(Category::ElementMention) {
            prop_assert!(!compounds.iter().any(|c| c.contains(mention.span)));
        }
    }

    /// Feeding the engine's own output back in is a no-op.
    #[test]
    fn idempotence(mut annotations in collection()) {
        let table = element_map();
        let resolver = Resolver::new(&table);

        resolver.resolve(&mut annotations, TEXT);
        let resolved = annotations.clone();
        let stats = resolver.resolve(&mut annotations, TEXT);

        prop_assert_eq!(&annotations, &resolved);
        prop_assert_eq!(stats.discarded, 0);
        prop_assert_eq!(stats.contained_removed, 0);
    }

    /// Resolution never drops or invents mention-category annotations beyond
    /// the containment rule, and never touches compound mentions at all.
    #[test]
    fn compound_mentions_are_preserved(mut annotations in collection()) {
        let table = element_map();
        let before: Vec<Annotation> = annotations
            .of_category(Category::CompoundMention)
            .cloned()
            .collect();

        Resolver::new(&table).resolve(&mut annotations, TEXT);

        let after: Vec<Annotation> = annotations
            .of_category(Category::CompoundMention)
            .cloned()
            .collect();
        prop_assert_eq!(before, after);
    }

    /// With removal disabled, every element mention survives resolution.
    #[test]
    fn removal_disabled_keeps_all_elements(mut annotations in collection()) {
        let table = element_map();
        let before = annotations.of_category(Category::ElementMention).count();

        Resolver::new(&table)
            .remove_contained_elements(false)
            .resolve(&mut annotations, TEXT);

        let after = annotations.of_category(Category::ElementMention).count();
        prop_assert_eq!(before, after);
    }
}
