//! # Reflux CLI
//!
//! Command-line front end for the column design engine: run a design from a
//! JSON input document, export its datasheet, size a fire-case PSV, and list
//! the built-in property packs.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use reflux_core::calculations::distillation::{design_from_normalized, normalize, DesignInputs, DesignResult, Internals};
use reflux_core::calculations::psv::{self, PsvInput, PsvResult};
use reflux_core::errors::{CalcError, CalcResult};
use reflux_core::pdf::{render_datasheet_pdf, render_datasheet_typst, DatasheetMeta};
use reflux_core::properties::ChemicalSystem;

#[derive(Parser)]
#[command(name = "reflux")]
#[command(about = "Reflux - binary distillation column shortcut design", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG wins when set
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Design a column
    Design {
        /// JSON input document (defaults when omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Chemical system, overriding the input document (e.g. "benzene-toluene")
        #[arg(long)]
        system: Option<String>,
        /// Use packing instead of trays
        #[arg(long)]
        packed: bool,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
        /// Write the PDF datasheet here
        #[arg(long)]
        datasheet: Option<PathBuf>,
        /// Write the datasheet Typst source here
        #[arg(long)]
        typst: Option<PathBuf>,
        /// Job number for the datasheet title block
        #[arg(long, default_value = "")]
        job: String,
        /// Engineer for the datasheet title block
        #[arg(long, default_value = "")]
        engineer: String,
    },
    /// Size a fire-case relief valve (API 520/521 preliminary)
    Psv {
        /// JSON relief input (defaults when omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Design input document whose column top temperature sets the relieving temperature
        #[arg(long)]
        relieving_temp_from: Option<PathBuf>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the built-in chemical systems
    Systems,
    /// Print the default design input document
    Defaults,
}

fn main() -> CalcResult<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Design {
            input,
            system,
            packed,
            json,
            datasheet,
            typst,
            job,
            engineer,
        } => cmd_design(DesignArgs {
            input: input.as_deref(),
            system: system.as_deref(),
            packed,
            json,
            datasheet: datasheet.as_deref(),
            typst: typst.as_deref(),
            meta: DatasheetMeta::new(job, engineer),
        }),
        Commands::Psv {
            input,
            relieving_temp_from,
            json,
        } => cmd_psv(input.as_deref(), relieving_temp_from.as_deref(), json),
        Commands::Systems => {
            cmd_systems();
            Ok(())
        }
        Commands::Defaults => cmd_defaults(),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_file(path: &Path) -> CalcResult<String> {
    fs::read_to_string(path).map_err(|e| CalcError::io(path.display().to_string(), &e))
}

fn write_file(path: &Path, bytes: &[u8]) -> CalcResult<()> {
    fs::write(path, bytes).map_err(|e| CalcError::io(path.display().to_string(), &e))
}

fn load_design_inputs(path: Option<&Path>) -> CalcResult<DesignInputs> {
    match path {
        Some(p) => {
            info!(path = %p.display(), "reading design input");
            DesignInputs::from_json(&read_file(p)?)
        }
        None => Ok(DesignInputs::default()),
    }
}

struct DesignArgs<'a> {
    input: Option<&'a Path>,
    system: Option<&'a str>,
    packed: bool,
    json: bool,
    datasheet: Option<&'a Path>,
    typst: Option<&'a Path>,
    meta: DatasheetMeta,
}

fn cmd_design(args: DesignArgs<'_>) -> CalcResult<()> {
    let mut inputs = load_design_inputs(args.input)?;
    if let Some(name) = args.system {
        inputs = inputs.with_system(ChemicalSystem::from_str_flexible(name)?);
    }
    if args.packed {
        inputs = inputs.with_internals(Internals::Packing);
    }

    let normalized = normalize(&inputs);
    let result = design_from_normalized(&normalized);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_design(&result);
        for adj in &normalized.adjustments {
            println!(
                "  note: {} {:?} ({} -> {})",
                adj.field,
                adj.kind,
                adj.original.as_deref().unwrap_or("absent"),
                adj.applied.map_or("not used".to_string(), |v| format!("{}", v)),
            );
        }
    }

    if let Some(path) = args.typst {
        let source = render_datasheet_typst(&normalized, &result, &args.meta);
        write_file(path, source.as_bytes())?;
        eprintln!("✓ Typst source written to {}", path.display());
    }
    if let Some(path) = args.datasheet {
        let pdf = render_datasheet_pdf(&normalized, &result, &args.meta)?;
        write_file(path, &pdf)?;
        eprintln!("✓ Datasheet written to {}", path.display());
    }
    Ok(())
}

fn dash(value: Option<f64>, decimals: usize) -> String {
    value.map_or("—".to_string(), |v| format!("{:.*}", decimals, v))
}

fn print_design(r: &DesignResult) {
    println!("═══════════════════════════════════════");
    println!("  COLUMN DESIGN: {} ({})", r.system, r.internals);
    println!("═══════════════════════════════════════");
    if r.bad_specs {
        println!();
        println!("  ! Check specs: Underwood root not bracketed. Review α, q, zF.");
    }
    println!();
    println!("Conditions:");
    println!("  Ttop / Tbot   = {:.1} / {:.1} °C", r.operating.t_top_c, r.operating.t_bottom_c);
    println!("  ρv / ρl (top) = {:.3} / {:.1} kg/m³", r.operating.rho_v_top, r.operating.rho_l_top);
    println!();
    println!("Shortcut (FUG):");
    println!("  Nmin  = {:.2}", r.fug.min_stages);
    println!("  θ     = {}", dash(r.fug.underwood_theta, 4));
    println!("  Rmin  = {}", dash(r.fug.min_reflux, 3));
    println!("  R     = {}", dash(r.fug.reflux_ratio, 3));
    println!("  N     = {}", dash(r.fug.theoretical_stages, 2));
    println!();
    println!("Balance (kmol/h):");
    println!("  D = {:.2}, B = {:.2}, V = {}", r.balance.distillate, r.balance.bottoms, dash(r.balance.vapor, 2));
    println!();
    println!("Hydraulics:");
    println!("  Allowable velocity = {:.3} m/s", r.hydraulics.allowable_velocity_m_s);
    println!("  Shell ID           = {} m", dash(r.hydraulics.diameter_m, 3));
    if let Some(t) = &r.hydraulics.trays {
        println!("  Trays              = {} ({:.2} m, {:.1} mbar)", t.actual_trays, t.height_m, t.pressure_drop_mbar);
    }
    if let Some(p) = &r.hydraulics.packing {
        println!("  Packed height      = {:.2} m ({:.1} mbar)", p.height_m, p.pressure_drop_mbar);
    }
    println!();
    let u = &r.utilities;
    println!("Utilities:");
    println!("  Qc / Qr        = {} / {} kJ/h", dash(u.condenser_duty_kj_h, 0), dash(u.reboiler_duty_kj_h, 0));
    println!("  CW             = {} kg/h ({:.1} -> {:.1} °C)", dash(u.cooling_water_kg_h, 0), u.cw_inlet_c, u.cw_outlet_c);
    println!("  Steam          = {} kg/h", dash(u.steam_kg_h, 0));
    println!("  Condenser      = {} m² (LMTD {} K)", dash(u.condenser_area_m2, 2), dash(u.condenser_lmtd_k, 2));
    println!("  Reboiler       = {} m² (ΔT {:.2} K)", dash(u.reboiler_area_m2, 2), u.reboiler_delta_t_k);
    println!("  Reflux drum    = {:.3} m³", r.drum.volume_m3);
    println!("═══════════════════════════════════════");
}

fn cmd_psv(input: Option<&Path>, relieving_temp_from: Option<&Path>, json: bool) -> CalcResult<()> {
    let mut psv_input: PsvInput = match input {
        Some(p) => serde_json::from_str(&read_file(p)?)?,
        None => PsvInput::default(),
    };
    if let Some(path) = relieving_temp_from {
        let design = design_from_normalized(&normalize(&load_design_inputs(Some(path))?));
        psv_input = psv_input.with_column_top(&design);
        info!(relieving_temp_k = psv_input.relieving_temp_k, "relieving temperature from column top");
    }

    let result = psv::calculate(&psv_input);
    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_psv(&psv_input, &result);
    }
    Ok(())
}

fn print_psv(input: &PsvInput, r: &PsvResult) {
    println!("═══════════════════════════════════════");
    println!("  PSV SIZING (fire case, {:?})", input.case);
    println!("═══════════════════════════════════════");
    println!("  Heat input        = {:.0} W", r.heat_input_w);
    println!("  Relief rate       = {:.4} kg/s", r.mass_rate_kg_s);
    println!("  Relieving P       = {:.1} kPa abs", r.relieving_pressure_kpa);
    println!("  Relieving T       = {:.1} K", input.relieving_temp_k);
    println!("  Required area     = {:.6} m² ({:.4} in²)", r.area_m2, r.area_in2);
    println!(
        "  API 526 orifice   = {} ({:.3} in²){}",
        r.orifice.letter,
        r.orifice.area.0,
        if r.exceeds_largest { "  ! exceeds largest, use multiple valves" } else { "" }
    );
    println!("═══════════════════════════════════════");
}

fn cmd_systems() {
    println!("Chemical systems:");
    for system in ChemicalSystem::ALL {
        match system.key_pair() {
            Some(pair) => println!(
                "  {:<16} LK {} (MW {:.2}), HK {} (MW {:.2})",
                system.display_name(),
                pair.light.name,
                pair.light.molar_mass,
                pair.heavy.name,
                pair.heavy.molar_mass
            ),
            None => println!("  {:<16} user-supplied properties, generic temperatures", system.display_name()),
        }
    }
}

fn cmd_defaults() -> CalcResult<()> {
    println!("{}", serde_json::to_string_pretty(&DesignInputs::default())?);
    Ok(())
}
