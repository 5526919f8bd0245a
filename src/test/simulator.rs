use crate::dv::Unreachable;
use crate::net::{Link, NodeId};
use crate::report::{SnapshotLogger, TraceOutcome};
use crate::sim::{
    LinkChange, Message, SimOpts, Simulator, format_trace, parse_changes, parse_messages,
    parse_topology,
};

fn run_to_string(topology: &str, messages: &str, changes: &str) -> (Simulator, String) {
    let links = parse_topology(topology).expect("topology");
    let msgs = parse_messages(messages).expect("messages");
    let changes = parse_changes(changes).expect("changes");

    let mut sim = Simulator::new(links, msgs, SimOpts::default());
    sim.snapshots = Some(SnapshotLogger::default());
    let mut out = Vec::new();
    sim.run(&changes, &mut out).expect("run");
    (sim, String::from_utf8(out).expect("utf8"))
}

#[test]
fn run_prints_tables_and_traces_for_each_epoch() {
    let (_, out) = run_to_string(
        "1 2 1\n2 3 1\n",
        "1 3 hello there\n3 1 back\n",
        "2 3 -999\n",
    );
    let expected = "\
1 1 0
2 2 1
3 2 2
1 1 1
2 2 0
3 3 1
1 2 2
2 2 1
3 3 0
from 1 to 3 cost 2 hops 1 2 message hello there
from 3 to 1 cost 2 hops 3 2 message back
1 1 0
2 2 1
1 1 1
2 2 0
3 3 0
from 1 to 3 cost infinite hops unreachable message hello there
from 3 to 1 cost infinite hops unreachable message back
";
    assert_eq!(out, expected);
}

#[test]
fn run_summary_counts_epochs_and_unreachable_traces() {
    let links = vec![Link::new(NodeId(1), NodeId(2), 1)];
    let msgs = parse_messages("1 2 a\n2 9 b\n").expect("messages");
    let changes = vec![
        LinkChange::set_cost(NodeId(2), NodeId(9), 3),
        LinkChange::remove(NodeId(1), NodeId(2)),
    ];
    let mut sim = Simulator::new(links, msgs, SimOpts::default());
    let summary = sim.run(&changes, &mut Vec::new()).expect("run");

    assert_eq!(summary.epochs, 3);
    assert_eq!(summary.messages_traced, 6);
    // epoch0: 2->9 未知；epoch2: 1->2 断开
    assert_eq!(summary.unreachable, 2);
    assert!(sim.snapshots.is_none());
}

#[test]
fn change_can_introduce_new_node() {
    let (sim, out) = run_to_string("1 2 1\n", "1 4 hi\n", "2 4 2\n");

    assert!(sim.net().contains(NodeId(4)));
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[4], "from 1 to 4 cost infinite hops unreachable message hi");
    assert_eq!(lines.last().copied(), Some("from 1 to 4 cost 3 hops 1 2 message hi"));
    assert!(out.contains("4 4 2\n"));
}

#[test]
fn snapshots_record_each_epoch_with_trace_outcomes() {
    let (sim, _) = run_to_string("1 2 1\n2 3 1\n", "1 3 x\n", "2 3 -999\n");
    let logger = sim.snapshots.as_ref().expect("snapshots enabled");

    assert_eq!(logger.epochs.len(), 2);
    assert_eq!(logger.epochs[0].change, None);
    assert_eq!(
        logger.epochs[1].change,
        Some(LinkChange::remove(NodeId(2), NodeId(3)))
    );
    assert_eq!(logger.epochs[0].tables.len(), 3);
    assert_eq!(
        logger.epochs[0].traces[0].outcome,
        TraceOutcome::Delivered {
            hops: vec![NodeId(1), NodeId(2)],
            cost: 2,
        }
    );
    assert_eq!(
        logger.epochs[1].traces[0].outcome,
        TraceOutcome::Unreachable {
            cause: Unreachable::NoRoute,
        }
    );
}

#[test]
fn snapshots_serialize_as_json_array() {
    let (sim, _) = run_to_string("1 2 1\n", "1 2 ping\n", "1 2 -999\n");
    let json = sim
        .snapshots
        .as_ref()
        .expect("snapshots")
        .to_json_pretty()
        .expect("json");
    let v: serde_json::Value = serde_json::from_str(&json).expect("parse json");
    let arr = v.as_array().expect("array");

    assert_eq!(arr.len(), 2);
    assert_eq!(arr[0]["traces"][0]["status"], "delivered");
    assert_eq!(arr[0]["traces"][0]["message"], "ping");
    assert_eq!(arr[1]["change"]["action"], "remove");
    assert_eq!(arr[1]["traces"][0]["status"], "unreachable");
    assert_eq!(arr[1]["traces"][0]["cause"]["reason"], "no_route");
}

#[test]
fn format_trace_for_self_message_has_empty_hop_list() {
    let msg = Message {
        src: NodeId(1),
        dst: NodeId(1),
        text: " me".to_string(),
    };
    let route = crate::dv::Route {
        path: vec![NodeId(1)],
        cost: 0,
    };
    assert_eq!(
        format_trace(&msg, &Ok(route)),
        "from 1 to 1 cost 0 hops message me"
    );
}
