//! IAI-Callgrind benchmark for AvlTree insertion, erasure and traversal.
//!
//! Measures instruction counts for ascending inserts (rotation heavy),
//! minimum-first erasure (minimum-holder refills) and a full position walk.

use iai_callgrind::{library_benchmark, library_benchmark_group, main};
use ordtree::AvlTree;
use std::hint::black_box;

fn setup_keys_1000() -> Vec<i32> {
    (0..1000).collect()
}

fn setup_keys_10000() -> Vec<i32> {
    (0..10000).collect()
}

fn setup_tree_1000() -> AvlTree<i32, i32> {
    (0..1000).map(|key| (key, key)).collect()
}

fn setup_tree_10000() -> AvlTree<i32, i32> {
    (0..10000).map(|key| (key, key)).collect()
}

fn walk(tree: &AvlTree<i32, i32>) -> i64 {
    let mut sum = 0i64;
    let mut position = tree.begin();
    while position != tree.end() {
        if let Some(&value) = tree.value(position) {
            sum += i64::from(value);
        }
        position = tree.next(position);
    }
    sum
}

fn drain_from_front(mut tree: AvlTree<i32, i32>) -> AvlTree<i32, i32> {
    while tree.erase(tree.begin()).is_some() {}
    tree
}

// insert benchmarks
#[library_benchmark]
#[bench::with_setup(setup_keys_1000())]
fn ascending_insert_1000(keys: Vec<i32>) -> AvlTree<i32, i32> {
    black_box(black_box(keys).into_iter().map(|key| (key, key)).collect())
}

#[library_benchmark]
#[bench::with_setup(setup_keys_10000())]
fn ascending_insert_10000(keys: Vec<i32>) -> AvlTree<i32, i32> {
    black_box(black_box(keys).into_iter().map(|key| (key, key)).collect())
}

#[library_benchmark]
#[bench::with_setup(setup_keys_1000())]
fn descending_insert_1000(keys: Vec<i32>) -> AvlTree<i32, i32> {
    black_box(black_box(keys).into_iter().rev().map(|key| (key, key)).collect())
}

// erase benchmarks
#[library_benchmark]
#[bench::with_setup(setup_tree_1000())]
fn erase_minimum_1000(tree: AvlTree<i32, i32>) -> AvlTree<i32, i32> {
    black_box(drain_from_front(black_box(tree)))
}

#[library_benchmark]
#[bench::with_setup(setup_tree_10000())]
fn erase_minimum_10000(tree: AvlTree<i32, i32>) -> AvlTree<i32, i32> {
    black_box(drain_from_front(black_box(tree)))
}

// traversal benchmarks
#[library_benchmark]
#[bench::with_setup(setup_tree_1000())]
fn position_walk_1000(tree: AvlTree<i32, i32>) -> i64 {
    black_box(walk(black_box(&tree)))
}

#[library_benchmark]
#[bench::with_setup(setup_tree_10000())]
fn position_walk_10000(tree: AvlTree<i32, i32>) -> i64 {
    black_box(walk(black_box(&tree)))
}

library_benchmark_group!(
    name = avl_tree_group;
    benchmarks =
        ascending_insert_1000, ascending_insert_10000, descending_insert_1000,
        erase_minimum_1000, erase_minimum_10000,
        position_walk_1000, position_walk_10000
);

main!(library_benchmark_groups = avl_tree_group);
