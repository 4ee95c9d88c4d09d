//! Route a circuit onto a line, then shrink it with the optimizer.

use qsx_compiler::{map_to_line, optimize};
use qsx_core::{Circuit, Op};

fn main() {
    let mut circuit = Circuit::new(4).unwrap();
    circuit.push(Op::h(0)).unwrap();
    circuit.push(Op::cnot(0, 3)).unwrap();
    circuit.push(Op::rz(3, 0.25)).unwrap();
    circuit.push(Op::rz(3, 0.50)).unwrap();
    circuit.push(Op::measure()).unwrap();

    let mapped = map_to_line(&circuit).unwrap();
    println!(
        "routed: {} ops (from {})\n{}",
        mapped.len(),
        circuit.len(),
        mapped
    );

    let optimized = optimize(&mapped).unwrap();
    println!("optimized: {} ops\n{}", optimized.len(), optimized);
}
