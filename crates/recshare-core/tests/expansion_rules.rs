//! Integration tests for the expansion rule evaluator.

use recshare_core::{
    is_visibility_expansion, newly_exposed_communities, IdSet, Recommendation, VisibilityLevel,
};

fn ids(v: &[&str]) -> IdSet {
    v.iter().copied().collect()
}

fn rec(visibility: VisibilityLevel, communities: &[&str]) -> Recommendation {
    Recommendation::new("r", visibility).with_communities(communities.iter().copied())
}

fn community_sets() -> Vec<IdSet> {
    vec![
        IdSet::new(),
        ids(&["A"]),
        ids(&["B"]),
        ids(&["A", "B"]),
        ids(&["A", "B", "C"]),
    ]
}

// ── Concrete scenarios ──────────────────────────────────────────────────

#[test]
fn private_into_public_list() {
    let r = rec(VisibilityLevel::Private, &[]);
    assert!(is_visibility_expansion(&r, VisibilityLevel::Public, &IdSet::new()));
}

#[test]
fn communities_same_set_is_not_expansion() {
    let r = rec(VisibilityLevel::Communities, &["A", "B"]);
    assert!(!is_visibility_expansion(
        &r,
        VisibilityLevel::Communities,
        &ids(&["A", "B"])
    ));
}

#[test]
fn communities_extra_list_circle_is_expansion() {
    let r = rec(VisibilityLevel::Communities, &["A"]);
    assert!(is_visibility_expansion(
        &r,
        VisibilityLevel::Communities,
        &ids(&["A", "B"])
    ));
}

#[test]
fn connections_into_communities_list_is_not_expansion() {
    let r = rec(VisibilityLevel::Connections, &[]);
    assert!(!is_visibility_expansion(
        &r,
        VisibilityLevel::Communities,
        &ids(&["A"])
    ));
}

// ── Properties over every tier pair ─────────────────────────────────────

#[test]
fn narrower_or_equal_list_never_expands_outside_community_tie() {
    for rec_vis in VisibilityLevel::ALL {
        for list_vis in VisibilityLevel::ALL {
            if list_vis > rec_vis
                || (rec_vis == VisibilityLevel::Communities
                    && list_vis == VisibilityLevel::Communities)
            {
                continue;
            }
            for rec_comms in community_sets() {
                for list_comms in community_sets() {
                    let r = Recommendation::new("r", rec_vis);
                    let r = Recommendation {
                        community_ids: rec_comms.clone(),
                        ..r
                    };
                    assert!(
                        !is_visibility_expansion(&r, list_vis, &list_comms),
                        "{rec_vis} into {list_vis} must not expand"
                    );
                }
            }
        }
    }
}

#[test]
fn public_recommendation_never_expands() {
    for list_vis in VisibilityLevel::ALL {
        for comms in community_sets() {
            let r = rec(VisibilityLevel::Public, &["A"]);
            assert!(!is_visibility_expansion(&r, list_vis, &comms));
        }
    }
}

#[test]
fn private_recommendation_always_expands_into_broader_list() {
    for list_vis in VisibilityLevel::ALL {
        if list_vis == VisibilityLevel::Private {
            continue;
        }
        for comms in community_sets() {
            let r = rec(VisibilityLevel::Private, &[]);
            assert!(is_visibility_expansion(&r, list_vis, &comms), "{list_vis}");
        }
    }
}

#[test]
fn community_tie_depends_only_on_list_minus_rec() {
    for rec_comms in community_sets() {
        for list_comms in community_sets() {
            let r = Recommendation {
                community_ids: rec_comms.clone(),
                ..Recommendation::new("r", VisibilityLevel::Communities)
            };
            let expected = !list_comms.difference(&rec_comms).is_empty();
            assert_eq!(
                is_visibility_expansion(&r, VisibilityLevel::Communities, &list_comms),
                expected
            );
            assert_eq!(
                newly_exposed_communities(&r, VisibilityLevel::Communities, &list_comms),
                list_comms.difference(&rec_comms)
            );
        }
    }
}

#[test]
fn rec_only_circles_do_not_matter() {
    // rec \ list is non-empty here but list \ rec is empty.
    let r = rec(VisibilityLevel::Communities, &["A", "B", "C"]);
    assert!(!is_visibility_expansion(
        &r,
        VisibilityLevel::Communities,
        &ids(&["B"])
    ));
}

#[test]
fn specific_list_behaves_as_communities() {
    let specific = VisibilityLevel::from_wire("specific");
    let r = rec(VisibilityLevel::Communities, &["A"]);
    assert!(is_visibility_expansion(&r, specific, &ids(&["A", "Z"])));
    let r = rec(VisibilityLevel::Connections, &[]);
    assert!(!is_visibility_expansion(&r, specific, &ids(&["A"])));
}

#[test]
fn evaluator_does_not_mutate_inputs() {
    let r = rec(VisibilityLevel::Communities, &["A"]);
    let before = r.clone();
    let list = ids(&["B"]);
    let _ = is_visibility_expansion(&r, VisibilityLevel::Communities, &list);
    let _ = newly_exposed_communities(&r, VisibilityLevel::Communities, &list);
    assert_eq!(r, before);
    assert_eq!(list, ids(&["B"]));
}
