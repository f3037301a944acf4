//! Pipeline orchestrator.
//!
//! normalize → size_dealers → price_deviation → sales_dynamics → classify.
//! Each stage reads the previous stage's fully materialized output; nothing
//! is shared mutably. The returned table is ordered by
//! (dealer, part, month, input row), so identical input yields an identical
//! table.

use pricewatch_core::config::InvalidRowPolicy;
use pricewatch_core::errors::{PipelineError, PipelineResult, ValidationError};
use pricewatch_core::tracing::StageTimer;
use pricewatch_core::{
    EnrichedRecord, PricewatchConfig, RawSalesRow, RuleThresholds, SalesRecord,
};

use crate::dynamics::SalesDynamicsCalculator;
use crate::pricing::PriceDeviationCalculator;
use crate::rules::{RuleEngine, RuleInput};
use crate::series::ScatterSeries;
use crate::sizing::DealerSizer;
use crate::summary::PipelineSummary;
use crate::temporal::DatedRecord;
use crate::validate::RecordValidator;

/// Everything a run produces.
#[derive(Debug, Clone, Default)]
pub struct PipelineOutput {
    pub records: Vec<EnrichedRecord>,
    pub summary: PipelineSummary,
    pub scatter: ScatterSeries,
}

/// The full pricing-anomaly pipeline.
#[derive(Debug, Clone)]
pub struct PricingPipeline {
    validator: RecordValidator,
    invalid_rows: InvalidRowPolicy,
    sizer: DealerSizer,
    pricing: PriceDeviationCalculator,
    dynamics: SalesDynamicsCalculator,
    engine: RuleEngine,
    parallel: bool,
}

impl Default for PricingPipeline {
    fn default() -> Self {
        Self::new(&PricewatchConfig::default())
    }
}

impl PricingPipeline {
    pub fn new(config: &PricewatchConfig) -> Self {
        Self {
            validator: RecordValidator::new(&config.ingest.columns),
            invalid_rows: config.ingest.effective_invalid_rows(),
            sizer: DealerSizer::new(&config.tiering),
            pricing: PriceDeviationCalculator,
            dynamics: SalesDynamicsCalculator::new(&config.dynamics),
            engine: RuleEngine::new(config.rules.thresholds()),
            parallel: config.pipeline.effective_parallel(),
        }
    }

    pub fn thresholds(&self) -> &RuleThresholds {
        self.engine.thresholds()
    }

    /// Validate raw rows, then run. Invalid rows abort the run or are
    /// skipped with a non-fatal error, per the invalid-row policy.
    pub fn run_raw(
        &self,
        rows: Vec<RawSalesRow>,
    ) -> Result<PipelineResult<PipelineOutput>, PipelineError> {
        let mut rejected = Vec::new();
        let mut records = Vec::with_capacity(rows.len());
        for raw in rows {
            match self.validator.validate(raw) {
                Ok(record) => records.push(record),
                Err(e) => self.reject_or_skip(e, &mut rejected)?,
            }
        }
        self.run_with(records, rejected)
    }

    /// Run over already-typed records. Blank identifiers and non-finite
    /// numbers go through the invalid-row policy like raw rows do.
    pub fn run(
        &self,
        records: Vec<SalesRecord>,
    ) -> Result<PipelineResult<PipelineOutput>, PipelineError> {
        let mut rejected = Vec::new();
        let mut checked = Vec::with_capacity(records.len());
        for record in records {
            match self.validator.check(record) {
                Ok(record) => checked.push(record),
                Err(e) => self.reject_or_skip(e, &mut rejected)?,
            }
        }
        self.run_with(checked, rejected)
    }

    fn reject_or_skip(
        &self,
        error: ValidationError,
        rejected: &mut Vec<ValidationError>,
    ) -> Result<(), PipelineError> {
        match self.invalid_rows {
            InvalidRowPolicy::Reject => Err(error.into()),
            InvalidRowPolicy::Skip => {
                tracing::warn!(row = ?error.row(), error = %error, "skipping invalid row");
                rejected.push(error);
                Ok(())
            }
        }
    }

    fn run_with(
        &self,
        records: Vec<SalesRecord>,
        mut rejected: Vec<ValidationError>,
    ) -> Result<PipelineResult<PipelineOutput>, PipelineError> {
        let mut stages = Vec::with_capacity(5);

        // Stage 1: temporal normalization + canonical ordering
        let timer = StageTimer::start("normalize");
        let rows_in = records.len();
        let mut dated = Vec::with_capacity(rows_in);
        for record in records {
            match DatedRecord::new(record) {
                Ok(d) => dated.push(d),
                Err(e) => self.reject_or_skip(e, &mut rejected)?,
            }
        }
        dated.sort_by(|a, b| {
            (&a.record.dealer_id, &a.record.part_id, a.month_start, a.record.row).cmp(&(
                &b.record.dealer_id,
                &b.record.part_id,
                b.month_start,
                b.record.row,
            ))
        });
        stages.push(timer.finish(rows_in, dated.len(), 0));

        // Stage 2: dealer sizing
        let timer = StageTimer::start("size_dealers");
        let sizing = self.sizer.size(&dated)?;
        stages.push(timer.finish(dated.len(), dated.len(), sizing.dealer_count()));

        // Stage 3: price deviation
        let timer = StageTimer::start("price_deviation");
        let prices = self.pricing.compute(&dated);
        stages.push(timer.finish(dated.len(), dated.len(), prices.group_count));

        // Stage 4: sales dynamics
        let timer = StageTimer::start("sales_dynamics");
        let dynamics = self.dynamics.compute(&dated);
        stages.push(timer.finish(dated.len(), dated.len(), dynamics.series_count));

        // Stage 5: classification
        let timer = StageTimer::start("classify");
        let inputs: Vec<RuleInput> = prices
            .metrics
            .iter()
            .zip(&dynamics.metrics)
            .map(|(p, s)| RuleInput {
                deviation_pct: p.price_deviation_pct,
                sales_percentile: Some(s.sales_percentile),
                mom_growth_pct: s.mom_growth_pct,
                yoy_growth_pct: s.yoy_growth_pct,
            })
            .collect();
        let matches = self.engine.classify_all(&inputs, self.parallel);
        stages.push(timer.finish(inputs.len(), matches.len(), 0));

        let enriched: Vec<EnrichedRecord> = dated
            .into_iter()
            .zip(prices.metrics.iter().zip(&dynamics.metrics).zip(&matches))
            .map(|(d, ((p, s), m))| EnrichedRecord {
                dealer_tier: sizing.tier_of(&d.record.dealer_id),
                record: d.record,
                month_start: d.month_start,
                month_last_year: s.month_last_year,
                network_median_price: p.network_median_price,
                price_deviation_pct: p.price_deviation_pct,
                abs_volume: s.abs_volume,
                prev_volume: s.prev_volume,
                mom_growth_pct: s.mom_growth_pct,
                last_year_volume: s.last_year_volume,
                yoy_growth_pct: s.yoy_growth_pct,
                sales_percentile: s.sales_percentile,
                outcome: m.outcome(),
            })
            .collect();

        let mut result = PipelineResult::<PipelineOutput>::default();
        let skipped_rows = rejected.len();
        for e in rejected {
            result.add_error(e);
        }
        if let Some(degenerate) = sizing.degenerate.clone() {
            tracing::warn!(error = %degenerate, "dealer tiers left null");
            result.add_error(degenerate);
        }
        for degenerate in prices.zero_median_groups {
            tracing::debug!(error = %degenerate, "price deviation left null");
            result.add_error(degenerate);
        }

        let mut summary = PipelineSummary::from_records(&enriched, &matches, &sizing.tier_counts());
        summary.skipped_rows = skipped_rows;
        summary.zero_base_growth = dynamics.zero_base_count;
        summary.non_fatal_errors = result.error_count();
        summary.stages = stages;
        summary.log();

        let scatter = ScatterSeries::from_records(&enriched, self.engine.thresholds());
        result.data = PipelineOutput {
            records: enriched,
            summary,
            scatter,
        };
        Ok(result)
    }
}
