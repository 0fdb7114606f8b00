use crate::fragment::{ByteSet, Fragment, ProcId};

#[test]
fn byte_set_insert_and_contains() {
    let mut set = ByteSet::new();
    assert!(set.is_empty());
    set.insert(b'a');
    set.insert(b'z');
    set.insert(0);
    set.insert(255);
    assert!(set.contains(b'a'));
    assert!(set.contains(b'z'));
    assert!(set.contains(0));
    assert!(set.contains(255));
    assert!(!set.contains(b'b'));
    assert_eq!(set.len(), 4);
}

#[test]
fn byte_set_iterates_in_order() {
    let set: ByteSet = [b'c', b'a', b'b'].into_iter().collect();
    let members: Vec<u8> = set.iter().collect();
    assert_eq!(members, [b'a', b'b', b'c']);
}

#[test]
fn byte_set_insert_is_idempotent() {
    let mut set = ByteSet::new();
    set.insert(b'x');
    set.insert(b'x');
    assert_eq!(set.len(), 1);
}

#[test]
fn proc_id_display() {
    assert_eq!(ProcId(7).to_string(), "p7");
}

#[test]
fn for_each_call_finds_nested_targets() {
    let fragment = Fragment::all_of(vec![
        Fragment::Call(ProcId(1)),
        Fragment::zero_or_more(Fragment::one_of(vec![
            Fragment::Call(ProcId(2)),
            Fragment::literal(*b"x"),
        ])),
        Fragment::make_node("n", Fragment::not_lookahead(Fragment::Call(ProcId(3)))),
    ]);
    let mut seen = Vec::new();
    fragment.for_each_call(&mut |id| seen.push(id));
    assert_eq!(seen, [ProcId(1), ProcId(2), ProcId(3)]);
}

#[test]
fn for_each_call_skips_leaves() {
    let mut seen = Vec::new();
    Fragment::AnyChar.for_each_call(&mut |id| seen.push(id));
    Fragment::CharRange(b'0', b'9').for_each_call(&mut |id| seen.push(id));
    assert!(seen.is_empty());
}
