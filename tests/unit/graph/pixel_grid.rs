use super::*;

use crate::graph::node::Value;

#[test]
fn grid_tree_exposes_shader_and_vector() {
    let grid = build_pixel_grid_tree().unwrap();
    let names: Vec<_> = grid.tree.interface.inputs.iter().map(|s| s.name).collect();
    assert_eq!(names, ["Shader", "Vector"]);
    assert_eq!(grid.tree.interface.outputs[0].ty, SocketType::Shader);
}

#[test]
fn wrap_nodes_take_modulo_one() {
    let grid = build_pixel_grid_tree().unwrap();
    for name in ["wrap_x", "wrap_y"] {
        let n = grid.tree.find(name).unwrap();
        assert_eq!(n.kind, NodeKind::Math { op: MathOp::Modulo });
        assert_eq!(n.inputs[1].value, Value::Float(1.0));
    }
}

#[test]
fn step_ramps_switch_at_line_width() {
    let grid = build_pixel_grid_tree().unwrap();
    let n = grid.tree.find("step_x").unwrap();
    let NodeKind::ColorRamp {
        interpolation,
        stops,
    } = &n.kind
    else {
        panic!("step_x is not a ramp");
    };
    assert_eq!(*interpolation, Interpolation::Constant);
    assert_eq!(stops.len(), 2);
    assert_eq!(stops[1].position, GRID_LINE_WIDTH);
}

#[test]
fn dimension_constants_start_at_zero() {
    let grid = build_pixel_grid_tree().unwrap();
    for r in [grid.width, grid.height] {
        let n = grid.tree.node(r.node).unwrap();
        assert_eq!(n.kind, NodeKind::Value);
        assert_eq!(n.outputs[0].value, Value::Float(0.0));
    }
}
