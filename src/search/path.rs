//! Path Reconstruction
//!
//! Walks parent pointers outward from the meeting node on both sides and
//! stitches the two half-paths together: `[start .. meeting]` from the
//! forward map, `[next .. end]` from the backward map.

use super::visited::VisitedMap;
use crate::types::WikiNode;

/// Build the full path through `meeting`.
///
/// The forward half always contains at least the meeting node itself. The
/// backward half is empty when the meeting node is the backward root, so
/// the result may be as short as one node.
pub fn reconstruct(
    meeting: &WikiNode,
    forward: &VisitedMap,
    backward: &VisitedMap,
) -> Vec<WikiNode> {
    let mut path = Vec::new();

    let mut current = meeting.clone();
    loop {
        path.push(current.clone());
        match forward.parent(&current.key()) {
            Some(Some(parent)) => current = parent,
            _ => break,
        }
    }
    path.reverse();

    if let Some(Some(first)) = backward.parent(&meeting.key()) {
        let mut current = first;
        loop {
            path.push(current.clone());
            match backward.parent(&current.key()) {
                Some(Some(parent)) => current = parent,
                _ => break,
            }
        }
    }

    path
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(title: &str) -> WikiNode {
        WikiNode::new(title, "en")
    }

    #[test]
    fn test_two_sided_reconstruction() {
        // forward: start -> a -> meet, backward: end -> b -> meet
        let forward = VisitedMap::new();
        forward.seed_root(node("start").key());
        forward.insert_if_absent(node("a").key(), node("start"));
        forward.insert_if_absent(node("meet").key(), node("a"));

        let backward = VisitedMap::new();
        backward.seed_root(node("end").key());
        backward.insert_if_absent(node("b").key(), node("end"));
        backward.insert_if_absent(node("meet").key(), node("b"));

        let path = reconstruct(&node("meet"), &forward, &backward);
        let titles: Vec<_> = path.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["start", "a", "meet", "b", "end"]);
    }

    #[test]
    fn test_meeting_at_backward_root() {
        // the forward side reached the end node directly
        let forward = VisitedMap::new();
        forward.seed_root(node("start").key());
        forward.insert_if_absent(node("end").key(), node("start"));

        let backward = VisitedMap::new();
        backward.seed_root(node("end").key());

        let path = reconstruct(&node("end"), &forward, &backward);
        let titles: Vec<_> = path.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["start", "end"]);
    }

    #[test]
    fn test_meeting_is_forward_root() {
        // the backward side reached the start node
        let forward = VisitedMap::new();
        forward.seed_root(node("start").key());

        let backward = VisitedMap::new();
        backward.seed_root(node("end").key());
        backward.insert_if_absent(node("start").key(), node("end"));

        let path = reconstruct(&node("start"), &forward, &backward);
        let titles: Vec<_> = path.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["start", "end"]);
    }

    #[test]
    fn test_single_node_path() {
        let forward = VisitedMap::new();
        forward.seed_root(node("only").key());
        let backward = VisitedMap::new();

        let path = reconstruct(&node("only"), &forward, &backward);
        assert_eq!(path.len(), 1);
        assert_eq!(path[0].title, "only");
    }
}
