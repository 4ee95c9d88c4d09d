//! Sample a Bell pair and print the outcome histogram.

use qsx_core::{Circuit, Op};
use qsx_sim::Executor;

fn main() {
    let mut circuit = Circuit::new(2).unwrap();
    circuit.push(Op::h(0)).unwrap();
    circuit.push(Op::cnot(0, 1)).unwrap();
    circuit.push(Op::measure()).unwrap();

    let executor = Executor::default();
    let result = executor.run(&circuit, 42).unwrap();
    println!("probabilities: {:?}", result.probabilities);

    let counts = executor.sample_parallel(&circuit, 42, 4096).unwrap();
    print!("{}", counts);
}
