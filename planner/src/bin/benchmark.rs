use std::fs::read_dir;

#[cfg(not(feature = "prof"))]
pub fn main() {
    println!("benchmarks not supported -- enable 'prof' crate feature")
}

#[derive(Debug)]
struct Result {
    time: f32,
    obj: f64,
    outcome: String,
}

fn get_instance_files() -> std::vec::Vec<std::path::PathBuf> {
    let mut filenames = read_dir("bench")
        .unwrap()
        .map(|e| e.unwrap().path())
        .filter(|e| e.as_os_str().to_string_lossy().ends_with(".json"))
        .collect::<Vec<_>>();
    filenames.sort();
    filenames
}

#[cfg(feature = "prof")]
pub fn main() {
    use dronefleet_planner::{build, extsolvers::highs::HighsSolverInstance, solve};
    use dronefleet_structs::{CapacityPolicy, FleetProblem};
    use std::{fs::read_to_string, time::Instant};

    env_logger::init();
    let policies = [("hard", CapacityPolicy::Hard), ("advisory", CapacityPolicy::Advisory)];

    println!("------------------------------");
    println!("dronefleet solver benchmarking");
    println!("------------------------------");
    println!();

    let instance_files = get_instance_files();
    let mut results: Vec<Vec<Result>> = Vec::new();
    let mut sizes: Vec<(u32, usize)> = Vec::new();

    println!("# RUNNING {} INSTANCES", instance_files.len());
    for filename in instance_files.iter() {
        results.push(Vec::new());
        let _p = hprof::enter("instance");
        let problem: FleetProblem = {
            let _p = hprof::enter("read");
            serde_json::from_str(&read_to_string(filename).unwrap()).unwrap()
        };
        println!(
            " * instance {} with {} demand points, fleet {}",
            filename.display(),
            problem.points.len(),
            problem.params.fleet_size
        );
        sizes.push((problem.params.fleet_size, problem.points.len()));

        for (policy_name, policy) in policies.iter() {
            println!("   - solving with: \"{}\" capacity", policy_name);
            let params = problem.params.clone().with_policy(*policy);
            let t0 = Instant::now();
            let outcome = build(&problem.points, &params)
                .and_then(|model| solve::<HighsSolverInstance>(&model));
            let time = t0.elapsed().as_secs_f32();
            results.last_mut().unwrap().push(match outcome {
                Ok(plan) => Result {
                    time,
                    obj: plan.objective,
                    outcome: if plan.verdict.sufficient {
                        "sufficient".to_string()
                    } else {
                        format!("short {}", plan.verdict.deficit)
                    },
                },
                Err(e) => Result {
                    time,
                    obj: f64::NAN,
                    outcome: e.status().map(|s| s.to_string()).unwrap_or_else(|| e.to_string()),
                },
            });
        }
    }
    println!();
    println!("# PROFILER");
    hprof::profiler().print_timing();
    println!();

    println!("# RESULTS");

    use std::io::Write;
    let table = Vec::new();
    let mut tablewriter = tabwriter::TabWriter::new(table);
    write!(&mut tablewriter, "filename\tfleet\tpts").unwrap();
    for (policy_name, _) in &policies {
        write!(&mut tablewriter, "\t|\t{}\t\t", policy_name).unwrap();
    }
    writeln!(&mut tablewriter).unwrap();

    write!(&mut tablewriter, "\t\t").unwrap();
    for _ in &policies {
        write!(&mut tablewriter, "\t|\ttime\tobj\tresult",).unwrap();
    }
    writeln!(&mut tablewriter).unwrap();

    write!(&mut tablewriter, "---\t---\t---").unwrap();
    for _ in &policies {
        write!(&mut tablewriter, "\t\t---\t---\t---").unwrap();
    }
    writeln!(&mut tablewriter).unwrap();

    for ((filename, (fleet, pts)), policy_results) in
        instance_files.iter().zip(sizes.iter()).zip(results.iter())
    {
        write!(
            &mut tablewriter,
            "{}\t{}\t{}",
            filename.file_stem().unwrap().to_string_lossy(),
            fleet,
            pts
        )
        .unwrap();
        for result in policy_results.iter() {
            write!(
                &mut tablewriter,
                "\t|\t{:.3}\t{:.0}\t{}",
                result.time, result.obj, result.outcome
            )
            .unwrap();
        }
        writeln!(&mut tablewriter).unwrap();
    }

    let written = String::from_utf8(tablewriter.into_inner().unwrap()).unwrap();
    println!("{}", written);
}
