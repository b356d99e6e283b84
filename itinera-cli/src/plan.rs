//! Plan command implementation for the Itinera CLI.

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use itinera_core::{ClusterPlanner, PlanRequest, PlanResponse, Planner, TransportMode};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use std::io::{BufReader, Write};

use crate::fs::{file_is_file, open_utf8_file, write_utf8_file};
use crate::{
    ARG_PLAN_END_TIME, ARG_PLAN_OUTPUT, ARG_PLAN_RADIUS_KM, ARG_PLAN_REQUEST, ARG_PLAN_START_TIME,
    ARG_PLAN_TRANSPORT_MODE, CliError, ENV_PLAN_REQUEST,
};

/// CLI arguments for the `plan` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Plan a multi-day itinerary from a JSON-encoded PlanRequest. \
                 POIs are grouped into radius clusters, each cluster is walked \
                 in nearest-neighbour order and the stops are packed into the \
                 daily time window. Flags override the request's own values.",
    about = "Plan a day-by-day itinerary"
)]
#[ortho_config(prefix = "ITINERA")]
pub(crate) struct PlanArgs {
    /// Path to a JSON file containing a PlanRequest.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Write the plan to this file instead of stdout.
    #[arg(long = ARG_PLAN_OUTPUT, short = 'o', value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
    /// Override the clustering radius in kilometres.
    #[arg(long = ARG_PLAN_RADIUS_KM, value_name = "km")]
    #[serde(default)]
    pub(crate) radius_km: Option<f64>,
    /// Override the daily start time (`HH:MM`).
    #[arg(long = ARG_PLAN_START_TIME, value_name = "HH:MM")]
    #[serde(default)]
    pub(crate) start_time: Option<String>,
    /// Override the daily end time (`HH:MM`).
    #[arg(long = ARG_PLAN_END_TIME, value_name = "HH:MM")]
    #[serde(default)]
    pub(crate) end_time: Option<String>,
    /// Override the transport mode (walk, transit or drive).
    #[arg(long = ARG_PLAN_TRANSPORT_MODE, value_name = "mode")]
    #[serde(default)]
    pub(crate) transport_mode: Option<TransportMode>,
}

impl PlanArgs {
    pub(crate) fn into_config(self) -> Result<PlanConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PlanConfig::try_from(merged)
    }
}

/// Request fields replaced by command-line or environment settings.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct RequestOverrides {
    pub(crate) radius_km: Option<f64>,
    pub(crate) start_time: Option<String>,
    pub(crate) end_time: Option<String>,
    pub(crate) transport_mode: Option<TransportMode>,
}

impl RequestOverrides {
    /// Replace each request field that has an override set.
    pub(crate) fn apply(&self, request: &mut PlanRequest) {
        if let Some(radius_km) = self.radius_km {
            request.radius_km = radius_km;
        }
        if let Some(start_time) = &self.start_time {
            request.start_time.clone_from(start_time);
        }
        if let Some(end_time) = &self.end_time {
            request.end_time.clone_from(end_time);
        }
        if let Some(transport_mode) = self.transport_mode {
            request.transport_mode = transport_mode;
        }
    }
}

/// Resolved `plan` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PlanConfig {
    /// Path to the JSON request file.
    pub(crate) request_path: Utf8PathBuf,
    /// Destination file; stdout when unset.
    pub(crate) output: Option<Utf8PathBuf>,
    pub(crate) overrides: RequestOverrides,
}

impl PlanConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(&self.request_path, ARG_PLAN_REQUEST)
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

impl TryFrom<PlanArgs> for PlanConfig {
    type Error = CliError;

    fn try_from(args: PlanArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_PLAN_REQUEST,
            env: ENV_PLAN_REQUEST,
        })?;

        Ok(Self {
            request_path,
            output: args.output,
            overrides: RequestOverrides {
                radius_km: args.radius_km,
                start_time: args.start_time,
                end_time: args.end_time,
                transport_mode: args.transport_mode,
            },
        })
    }
}

/// Builds a planner instance for the current plan invocation.
pub(super) trait PlannerBuilder {
    fn build(&self, config: &PlanConfig) -> Result<Box<dyn Planner>, CliError>;
}

pub(super) struct DefaultPlannerBuilder;

impl PlannerBuilder for DefaultPlannerBuilder {
    fn build(&self, _config: &PlanConfig) -> Result<Box<dyn Planner>, CliError> {
        Ok(Box::new(ClusterPlanner))
    }
}

pub(super) fn run_plan(args: PlanArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    let builder = DefaultPlannerBuilder;
    run_plan_with(args, &builder, &mut stdout)
}

pub(super) fn run_plan_with(
    args: PlanArgs,
    builder: &dyn PlannerBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = resolve_plan_config(args)?;
    let response = execute_plan(&config, builder)?;
    match &config.output {
        Some(path) => write_plan_file(path, &response),
        None => write_plan_response(writer, &response),
    }
}

pub(super) fn execute_plan(
    config: &PlanConfig,
    builder: &dyn PlannerBuilder,
) -> Result<PlanResponse, CliError> {
    let mut request = load_plan_request(&config.request_path)?;
    config.overrides.apply(&mut request);
    // The planner validates again; this pass attaches the request path.
    request
        .validate_detailed()
        .map_err(|source| CliError::InvalidPlanRequest {
            path: config.request_path.clone(),
            source,
        })?;
    log::info!(
        "planning {} POIs from {}",
        request.pois.len(),
        config.request_path
    );
    let planner = builder.build(config)?;
    planner
        .plan(&request)
        .map_err(|source| CliError::Plan { source })
}

fn resolve_plan_config(args: PlanArgs) -> Result<PlanConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

/// Loads a JSON-encoded [`PlanRequest`] from disk.
pub(super) fn load_plan_request(path: &Utf8Path) -> Result<PlanRequest, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenPlanRequest {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| CliError::ParsePlanRequest {
        path: path.to_path_buf(),
        source,
    })
}

fn render_plan_response(response: &PlanResponse) -> Result<String, CliError> {
    let mut payload =
        serde_json::to_string_pretty(response).map_err(CliError::SerialisePlanResponse)?;
    payload.push('\n');
    Ok(payload)
}

pub(super) fn write_plan_response(
    writer: &mut dyn Write,
    response: &PlanResponse,
) -> Result<(), CliError> {
    let payload = render_plan_response(response)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WritePlanOutput)
}

fn write_plan_file(path: &Utf8Path, response: &PlanResponse) -> Result<(), CliError> {
    let payload = render_plan_response(response)?;
    write_utf8_file(path, payload.as_bytes()).map_err(|source| CliError::WritePlanFile {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("wrote itinerary to {path}");
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<PlanConfig, CliError> {
    let merged = PlanArgs::merge_from_layers(layers).map_err(CliError::from)?;
    PlanConfig::try_from(merged)
}
