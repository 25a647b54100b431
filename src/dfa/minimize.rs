use crate::Dfa;
use std::collections::{BTreeMap, BTreeSet, VecDeque};

// Sentinel block index for the implicit dead state.
const DEAD: usize = usize::MAX;

fn block_index(blocks: &[Vec<usize>]) -> BTreeMap<usize, usize> {
    let mut map = BTreeMap::new();
    for (index, block) in blocks.iter().enumerate() {
        for state in block {
            map.insert(*state, index);
        }
    }
    map
}

impl Dfa {
    fn reachable(&self) -> BTreeSet<usize> {
        let mut seen = BTreeSet::from([self.initial]);
        let mut queue = VecDeque::from([self.initial]);
        while let Some(state) = queue.pop_front() {
            for byte in &self.alphabet {
                if let Some(target) = self.transitions.get(&(state, *byte)) {
                    if seen.insert(*target) {
                        queue.push_back(*target);
                    }
                }
            }
        }
        seen
    }

    fn live(&self) -> BTreeSet<usize> {
        let mut reversed: BTreeMap<usize, BTreeSet<usize>> = BTreeMap::new();
        for ((from, _), to) in &self.transitions {
            reversed.entry(*to).or_default().insert(*from);
        }
        let mut seen: BTreeSet<usize> = self.accepting.clone();
        let mut queue: VecDeque<usize> = self.accepting.iter().copied().collect();
        while let Some(state) = queue.pop_front() {
            if let Some(sources) = reversed.get(&state) {
                for source in sources {
                    if seen.insert(*source) {
                        queue.push_back(*source);
                    }
                }
            }
        }
        seen
    }

    /// Minimize by partition refinement. Unreachable states and states that
    /// cannot reach an accepting state are dropped first (the initial state
    /// always survives); the remaining states start in the accepting and
    /// non-accepting blocks and a block splits whenever two members disagree
    /// on the destination block under some alphabet byte. The final blocks
    /// are renumbered breadth-first from the initial block so that equal
    /// languages produce identical tables.
    pub fn minimize(&self) -> Dfa {
        let reachable = self.reachable();
        let live = self.live();
        let mut alive: BTreeSet<usize> = reachable.intersection(&live).copied().collect();
        alive.insert(self.initial);

        let accepting_block: Vec<usize> = alive
            .iter()
            .copied()
            .filter(|s| self.accepting.contains(s))
            .collect();
        let other_block: Vec<usize> = alive
            .iter()
            .copied()
            .filter(|s| !self.accepting.contains(s))
            .collect();
        let mut blocks: Vec<Vec<usize>> = [accepting_block, other_block]
            .into_iter()
            .filter(|block| !block.is_empty())
            .collect();

        loop {
            let map = block_index(&blocks);
            let mut refined: Vec<Vec<usize>> = Vec::new();
            for block in &blocks {
                // Group the members by their destination blocks, keeping the
                // first occurrence order.
                let mut groups: Vec<(Vec<usize>, Vec<usize>)> = Vec::new();
                for state in block {
                    let key: Vec<usize> = self
                        .alphabet
                        .iter()
                        .map(|byte| {
                            self.transitions
                                .get(&(*state, *byte))
                                .and_then(|target| map.get(target).copied())
                                .unwrap_or(DEAD)
                        })
                        .collect();
                    match groups.iter_mut().find(|(existing, _)| *existing == key) {
                        Some((_, members)) => members.push(*state),
                        None => groups.push((key, vec![*state])),
                    }
                }
                refined.extend(groups.into_iter().map(|(_, members)| members));
            }
            let settled = refined.len() == blocks.len();
            blocks = refined;
            if settled {
                break;
            }
        }

        let map = block_index(&blocks);
        let representatives: Vec<usize> = blocks.iter().map(|block| block[0]).collect();

        // Breadth-first renumbering from the initial block; blocks that are
        // not visited are unreachable and disappear.
        let initial_block = map[&self.initial];
        let mut order: Vec<usize> = vec![initial_block];
        let mut new_id: BTreeMap<usize, usize> = BTreeMap::from([(initial_block, 0)]);
        let mut queue = VecDeque::from([initial_block]);
        while let Some(block) = queue.pop_front() {
            for byte in &self.alphabet {
                let target = self
                    .transitions
                    .get(&(representatives[block], *byte))
                    .and_then(|t| map.get(t).copied());
                if let Some(target) = target {
                    if !new_id.contains_key(&target) {
                        new_id.insert(target, order.len());
                        order.push(target);
                        queue.push_back(target);
                    }
                }
            }
        }

        let mut transitions: BTreeMap<(usize, u8), usize> = BTreeMap::new();
        for (id, block) in order.iter().enumerate() {
            for byte in &self.alphabet {
                let target = self
                    .transitions
                    .get(&(representatives[*block], *byte))
                    .and_then(|t| map.get(t).copied())
                    .and_then(|b| new_id.get(&b).copied());
                if let Some(target) = target {
                    transitions.insert((id, *byte), target);
                }
            }
        }

        let accepting: BTreeSet<usize> = order
            .iter()
            .enumerate()
            .filter_map(|(id, block)| {
                self.accepting
                    .contains(&representatives[*block])
                    .then_some(id)
            })
            .collect();

        Dfa {
            initial: 0,
            accepting,
            transitions,
            alphabet: self.alphabet.clone(),
            state_count: order.len(),
        }
    }
}
