use agora_core::{AgentId, Good, MarginalSchedule, Price};
use agora_ports::{EconomicAgent, ScheduleError, ScheduleKind, ScheduleResult};
use rust_decimal::Decimal;

/// Market-wide marginal curves for one good
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregatedCurves {
    /// Every buyer's unit values, highest first
    pub demand: Vec<Price>,
    /// Every seller's unit costs, lowest first
    pub supply: Vec<Price>,
}

/// Pools agents' marginal schedules into aggregate demand and supply
pub struct CurveAggregator;

impl CurveAggregator {
    /// Build the demand and supply curves for `good`
    ///
    /// Units are appended in agent order (all buyers, then all sellers) and
    /// then stably sorted, so equal prices keep that order. Fails on the
    /// first negative marginal value or on an agent that trades the good
    /// without a schedule for it.
    pub fn aggregate(
        agents: &[Box<dyn EconomicAgent>],
        good: &Good,
    ) -> ScheduleResult<AggregatedCurves> {
        let mut demand = Vec::new();
        let mut supply = Vec::new();

        for agent in agents.iter().filter(|a| a.is_buyer(good)) {
            let schedule = agent
                .value_schedule(good)
                .ok_or_else(|| missing(agent.id(), good, ScheduleKind::Value))?;
            append_units(&mut demand, schedule, agent.id(), good, ScheduleKind::Value)?;
        }

        for agent in agents.iter().filter(|a| a.is_seller(good)) {
            let schedule = agent
                .cost_schedule(good)
                .ok_or_else(|| missing(agent.id(), good, ScheduleKind::Cost))?;
            append_units(&mut supply, schedule, agent.id(), good, ScheduleKind::Cost)?;
        }

        demand.sort_by(|a, b| b.cmp(a));
        supply.sort();

        log::debug!("Aggregated demand for {}: {:?}", good, demand);
        log::debug!("Aggregated supply for {}: {:?}", good, supply);

        Ok(AggregatedCurves { demand, supply })
    }
}

fn append_units(
    curve: &mut Vec<Price>,
    schedule: &MarginalSchedule,
    agent: &AgentId,
    good: &Good,
    kind: ScheduleKind,
) -> ScheduleResult<()> {
    for unit in 1..=schedule.num_units() {
        let Some(value) = schedule.get_value(unit) else {
            break;
        };
        if value < Decimal::ZERO {
            return Err(ScheduleError::NegativeValue {
                agent: agent.clone(),
                good: good.clone(),
                kind,
                unit,
                value,
            });
        }
        curve.push(value);
    }
    Ok(())
}

fn missing(agent: &AgentId, good: &Good, kind: ScheduleKind) -> ScheduleError {
    ScheduleError::MissingSchedule {
        agent: agent.clone(),
        good: good.clone(),
        kind,
    }
}
