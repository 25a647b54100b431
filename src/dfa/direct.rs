use crate::{Dfa, Journal, NodeKind, SyntaxTree, TreeNode};
use std::collections::{BTreeMap, BTreeSet, HashMap};

// Per-position attributes accumulated while annotating the extended tree.
struct Annotation {
    next_position: usize,
    byte_of: BTreeMap<usize, u8>,
    followpos: BTreeMap<usize, BTreeSet<usize>>,
}

impl Annotation {
    fn new() -> Self {
        Self {
            next_position: 1,
            byte_of: BTreeMap::new(),
            followpos: BTreeMap::new(),
        }
    }

    fn follow(&mut self, from: &BTreeSet<usize>, to: &BTreeSet<usize>) {
        for position in from {
            self.followpos
                .entry(*position)
                .or_default()
                .extend(to.iter().copied());
        }
    }

    /// Number the leaves left to right and compute nullable, firstpos and
    /// lastpos bottom-up, accumulating followpos on the way.
    fn annotate(&mut self, node: &mut TreeNode) {
        if let Some(left) = node.left.as_mut() {
            self.annotate(left);
        }
        if matches!(
            node.kind,
            NodeKind::Literal(_) | NodeKind::EndMarker | NodeKind::Epsilon
        ) {
            node.position = Some(self.next_position);
            self.next_position += 1;
        }
        if let Some(right) = node.right.as_mut() {
            self.annotate(right);
        }

        match node.kind {
            NodeKind::Literal(byte) => {
                let position = node.position.unwrap_or_default();
                self.byte_of.insert(position, byte);
                node.nullable = false;
                node.firstpos = BTreeSet::from([position]);
                node.lastpos = BTreeSet::from([position]);
            }
            NodeKind::EndMarker => {
                let position = node.position.unwrap_or_default();
                node.nullable = false;
                node.firstpos = BTreeSet::from([position]);
                node.lastpos = BTreeSet::from([position]);
            }
            NodeKind::Epsilon => {
                // Numbered for stability but never part of any position set.
                node.nullable = true;
                node.firstpos = BTreeSet::new();
                node.lastpos = BTreeSet::new();
            }
            NodeKind::Or => {
                let (left, right) = (&node.left, &node.right);
                if let (Some(left), Some(right)) = (left, right) {
                    node.nullable = left.nullable || right.nullable;
                    node.firstpos = left.firstpos.union(&right.firstpos).copied().collect();
                    node.lastpos = left.lastpos.union(&right.lastpos).copied().collect();
                }
            }
            NodeKind::Concat => {
                if let (Some(left), Some(right)) = (&node.left, &node.right) {
                    node.nullable = left.nullable && right.nullable;
                    node.firstpos = if left.nullable {
                        left.firstpos.union(&right.firstpos).copied().collect()
                    } else {
                        left.firstpos.clone()
                    };
                    node.lastpos = if right.nullable {
                        left.lastpos.union(&right.lastpos).copied().collect()
                    } else {
                        right.lastpos.clone()
                    };
                }
                let follow = node
                    .left
                    .as_ref()
                    .zip(node.right.as_ref())
                    .map(|(l, r)| (l.lastpos.clone(), r.firstpos.clone()));
                if let Some((from, to)) = follow {
                    self.follow(&from, &to);
                }
            }
            NodeKind::Star => {
                if let Some(child) = &node.left {
                    node.nullable = true;
                    node.firstpos = child.firstpos.clone();
                    node.lastpos = child.lastpos.clone();
                }
                let follow = node
                    .left
                    .as_ref()
                    .map(|c| (c.lastpos.clone(), c.firstpos.clone()));
                if let Some((from, to)) = follow {
                    self.follow(&from, &to);
                }
            }
        }
    }
}

impl Dfa {
    /// Build the automaton directly from the syntax tree. The tree is
    /// extended with an end marker whose position identifies accepting
    /// states; the subset construction then runs over position sets, the
    /// alphabet being walked in ascending order so that state numbering is
    /// reproducible.
    pub fn direct(tree: &SyntaxTree, journal: &mut Journal) -> Option<Dfa> {
        let root = tree.root.as_ref()?.clone();
        let mut extended = TreeNode::concat(root, TreeNode::leaf(NodeKind::EndMarker));

        let mut annotation = Annotation::new();
        annotation.annotate(&mut extended);

        let end_position = extended
            .right
            .as_ref()
            .and_then(|marker| marker.position)?;

        let mut state_sets: Vec<BTreeSet<usize>> = vec![extended.firstpos.clone()];
        let mut set_index: HashMap<BTreeSet<usize>, usize> = HashMap::new();
        set_index.insert(extended.firstpos.clone(), 0);
        let mut transitions: BTreeMap<(usize, u8), usize> = BTreeMap::new();

        let mut cursor = 0;
        while cursor < state_sets.len() {
            let current = state_sets[cursor].clone();
            for byte in &tree.alphabet {
                let mut followers: BTreeSet<usize> = BTreeSet::new();
                for position in &current {
                    if annotation.byte_of.get(position) == Some(byte) {
                        if let Some(follow) = annotation.followpos.get(position) {
                            followers.extend(follow.iter().copied());
                        }
                    }
                }
                if followers.is_empty() {
                    continue;
                }
                let target = match set_index.get(&followers) {
                    Some(index) => *index,
                    None => {
                        state_sets.push(followers.clone());
                        set_index.insert(followers, state_sets.len() - 1);
                        state_sets.len() - 1
                    }
                };
                transitions.insert((cursor, *byte), target);
            }
            cursor += 1;
        }

        let accepting: BTreeSet<usize> = state_sets
            .iter()
            .enumerate()
            .filter_map(|(index, set)| set.contains(&end_position).then_some(index))
            .collect();

        if accepting.is_empty() {
            journal.record(
                "no accepting state is reachable",
                "the pattern matches the empty language",
            );
            return None;
        }

        Some(Dfa {
            initial: 0,
            accepting,
            transitions,
            alphabet: tree.alphabet.clone(),
            state_count: state_sets.len(),
        })
    }
}
