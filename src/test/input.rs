use crate::net::{Link, NodeId};
use crate::sim::{
    ChangeAction, InputError, InputKind, LinkChange, parse_changes, parse_messages,
    parse_topology,
};

#[test]
fn topology_parses_links_and_skips_blank_lines() {
    let raw = "1 2 3\n\n  \n2 4 0\r\n-1 7 12  \n";
    let links = parse_topology(raw).expect("parse topology");
    assert_eq!(
        links,
        vec![
            Link::new(NodeId(1), NodeId(2), 3),
            Link::new(NodeId(2), NodeId(4), 0),
            Link::new(NodeId(-1), NodeId(7), 12),
        ]
    );
}

#[test]
fn topology_rejects_missing_field_with_line_number() {
    let err = parse_topology("1 2 3\n\n4 5\n").expect_err("missing cost");
    assert_eq!(
        err,
        InputError::MissingField {
            kind: InputKind::Topology,
            line: 3,
            field: "cost",
        }
    );
    assert_eq!(err.to_string(), "topology line 3: missing field `cost`");
}

#[test]
fn topology_rejects_non_integer_and_negative_cost() {
    let err = parse_topology("1 x 3\n").expect_err("bad node");
    assert!(matches!(
        err,
        InputError::InvalidInteger { field: "nodeB", ref token, .. } if token == "x"
    ));

    let err = parse_topology("1 2 -999\n").expect_err("negative cost");
    assert_eq!(
        err,
        InputError::NegativeCost {
            kind: InputKind::Topology,
            line: 1,
            cost: -999,
        }
    );
}

#[test]
fn messages_keep_text_verbatim_after_destination() {
    let raw = "1 3 here is a message\n2 2\n5  6   spaced  out \n";
    let msgs = parse_messages(raw).expect("parse messages");

    assert_eq!(msgs.len(), 3);
    assert_eq!((msgs[0].src, msgs[0].dst), (NodeId(1), NodeId(3)));
    assert_eq!(msgs[0].text, " here is a message");
    assert_eq!(msgs[1].text, "");
    assert_eq!(msgs[2].text, "   spaced  out ");
}

#[test]
fn messages_reject_missing_destination() {
    let err = parse_messages("1 2 ok\n7\n").expect_err("missing dst");
    assert_eq!(
        err,
        InputError::MissingField {
            kind: InputKind::Messages,
            line: 2,
            field: "destination",
        }
    );
}

#[test]
fn changes_map_sentinel_to_removal() {
    let raw = "2 3 -999\n1 4 7\n";
    let changes = parse_changes(raw).expect("parse changes");
    assert_eq!(
        changes,
        vec![
            LinkChange::remove(NodeId(2), NodeId(3)),
            LinkChange::set_cost(NodeId(1), NodeId(4), 7),
        ]
    );
    assert_eq!(changes[0].action, ChangeAction::Remove);
    assert_eq!(changes[0].to_string(), "2 3 -999");
    assert_eq!(changes[1].to_string(), "1 4 7");
}

#[test]
fn changes_reject_other_negative_costs() {
    let err = parse_changes("1 2 4\n1 2 -5\n").expect_err("negative");
    assert_eq!(err.to_string(), "changes line 2: negative link cost -5");
}

#[test]
fn topology_rejects_trailing_fields_instead_of_reading_next_link() {
    let err = parse_topology("1 2 3\n1 2 3 4 5 6\n").expect_err("trailing fields");
    assert_eq!(
        err,
        InputError::TrailingField {
            kind: InputKind::Topology,
            line: 2,
            token: "4".to_string(),
        }
    );
    assert_eq!(
        err.to_string(),
        "topology line 2: unexpected trailing field \"4\""
    );
}

#[test]
fn changes_reject_trailing_fields_after_sentinel() {
    let err = parse_changes("2 3 -999 oops\n").expect_err("trailing field");
    assert_eq!(
        err,
        InputError::TrailingField {
            kind: InputKind::Changes,
            line: 1,
            token: "oops".to_string(),
        }
    );
}
