//! union find structure <http://en.wikipedia.org/wiki/Disjoint-set_data_structure>
//!
//! This is the UnionFind we used for Kruskal, made growable so that nodes can be
//! added as labels are discovered in the edge stream.

use std::mem;

/// Nodes are dense indexes. A node is its own root until united with another one.
pub struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u32>,
} // end of UnionFind

impl UnionFind {
    pub fn new() -> Self {
        UnionFind {
            parent: Vec::new(),
            rank: Vec::new(),
        }
    } // end of new

    /// allocates nodes so that node is a valid index. New nodes are singletons.
    pub fn grow_to(&mut self, node: usize) {
        while self.parent.len() <= node {
            self.parent.push(self.parent.len());
            self.rank.push(1);
        }
    }

    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Find root and compress path by path halving.
    pub fn find(&mut self, mut node: usize) -> usize {
        while self.parent[node] != node {
            self.parent[node] = self.parent[self.parent[node]];
            node = self.parent[node];
        }
        node
    }

    /// unites classes of a and b. Returns false if they were already in the same class.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let mut ra = self.find(a);
        let mut rb = self.find(b);
        if ra == rb {
            return false;
        }
        if self.rank[ra] < self.rank[rb] {
            mem::swap(&mut ra, &mut rb);
        }
        self.parent[rb] = ra;
        if self.rank[ra] == self.rank[rb] {
            self.rank[ra] += 1;
        }
        true
    } // end of union

    #[allow(unused)]
    pub(crate) fn get_parent(&self) -> &Vec<usize> {
        &self.parent
    }
} // end of impl UnionFind

impl Default for UnionFind {
    fn default() -> Self {
        Self::new()
    }
}

//=======================================================================================

#[cfg(test)]
mod tests {

    use super::*;

    fn from_parents(parent: Vec<usize>) -> UnionFind {
        let rank = vec![1; parent.len()];
        UnionFind { parent, rank }
    }

    // taken from path-finding
    #[test]
    fn test_path_halving() {
        let mut unionf = from_parents(vec![0, 0, 1, 2, 3, 4, 5, 6]);

        assert_eq!(unionf.find(7), 0);
        assert_eq!(unionf.get_parent(), &vec![0, 0, 1, 1, 3, 3, 5, 5]);

        assert_eq!(unionf.find(7), 0);
        assert_eq!(unionf.get_parent(), &vec![0, 0, 1, 0, 3, 3, 5, 3]);

        assert_eq!(unionf.find(7), 0);
        assert_eq!(unionf.get_parent(), &vec![0, 0, 1, 0, 3, 3, 5, 0]);

        assert_eq!(unionf.find(6), 0);
        assert_eq!(unionf.get_parent(), &vec![0, 0, 1, 0, 3, 3, 3, 0]);

        assert_eq!(unionf.find(6), 0);
        assert_eq!(unionf.get_parent(), &vec![0, 0, 1, 0, 3, 3, 0, 0]);
    } // end test_path_halving

    #[test]
    fn test_grow_and_union() {
        let mut unionf = UnionFind::new();
        assert!(unionf.is_empty());
        unionf.grow_to(4);
        assert_eq!(unionf.len(), 5);
        assert!(unionf.union(0, 1));
        assert!(unionf.union(3, 4));
        assert!(!unionf.union(1, 0));
        assert_eq!(unionf.find(0), unionf.find(1));
        assert_ne!(unionf.find(0), unionf.find(3));
        assert_eq!(unionf.find(2), 2);
        assert!(unionf.union(1, 4));
        assert_eq!(unionf.find(0), unionf.find(3));
        // growing keeps existing classes
        unionf.grow_to(6);
        assert_eq!(unionf.find(4), unionf.find(0));
        assert_eq!(unionf.find(6), 6);
    } // end of test_grow_and_union
} // end of mod tests
