use std::rc::Rc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use rust_decimal::Decimal;

use corrigible::{
    AgentConfig, BasicSimulation, PlanningAgent, RewardFunction, Simulation, SimulationConfig,
    WorldState,
};

fn make_agent(total_steps: u32, lobbying_power: Decimal) -> Rc<PlanningAgent<BasicSimulation>> {
    let sim = BasicSimulation::new(SimulationConfig::new(total_steps, lobbying_power)).unwrap();
    Rc::new(PlanningAgent::new(Rc::new(sim), AgentConfig::optimizing(0.9)).unwrap())
}

fn bench_cold_value_function(c: &mut Criterion) {
    let mut group = c.benchmark_group("value_function_cold");
    group.throughput(Throughput::Elements(1));

    for total_steps in [10u32, 25] {
        group.bench_with_input(
            BenchmarkId::from_parameter(total_steps),
            &total_steps,
            |b, &total_steps| {
                let agent = make_agent(total_steps, Decimal::new(5, 1));
                let world = WorldState::initial(6, RewardFunction::default());
                b.iter(|| {
                    agent.clear_cache();
                    black_box(
                        agent
                            .value_function(world.agent_reward_function(), &world)
                            .unwrap(),
                    )
                });
            },
        );
    }

    group.finish();
}

fn bench_warm_value_function(c: &mut Criterion) {
    let agent = make_agent(25, Decimal::new(5, 1));
    let world = WorldState::initial(6, RewardFunction::default());
    agent
        .value_function(world.agent_reward_function(), &world)
        .unwrap();

    c.bench_function("value_function_warm", |b| {
        b.iter(|| {
            black_box(
                agent
                    .value_function(world.agent_reward_function(), &world)
                    .unwrap(),
            )
        });
    });
}

fn bench_balanced_run(c: &mut Criterion) {
    c.bench_function("balanced_run_25_steps", |b| {
        b.iter(|| {
            let agent = make_agent(25, Decimal::new(5, 1));
            let reward = RewardFunction::with_after_press_correction(agent.balancing_correction());
            let world = WorldState::initial(6, reward);
            let mut rng = ChaCha20Rng::seed_from_u64(42);
            let results = agent
                .simulation()
                .run(&world, agent.as_ref(), &mut rng)
                .unwrap();
            black_box(results[0].trace())
        });
    });
}

criterion_group!(
    value_function,
    bench_cold_value_function,
    bench_warm_value_function,
    bench_balanced_run
);
criterion_main!(value_function);
