//! The six document templates
//!
//! Each template builds the body lines for one document type. Every
//! document carries the full cross-reference table so any single document
//! resolves back to the complete pack.

use crate::domain::entities::{format_coordinates, DocumentType};
use crate::domain::zones::{all_zones, ZoneClass};
use crate::error::DomainError;

use super::layout::{field, thin_rule};
use super::PackContext;

fn cross_references(ctx: &PackContext<'_>) -> Vec<String> {
    let mut lines = vec![
        String::new(),
        "PACK CROSS-REFERENCES".to_string(),
        thin_rule(),
    ];
    for doc_type in DocumentType::ALL {
        lines.push(field(doc_type.title(), ctx.reference(doc_type)));
    }
    lines
}

fn producer_block(ctx: &PackContext<'_>) -> Vec<String> {
    let producer = ctx.producer;
    vec![
        String::new(),
        "PRODUCER".to_string(),
        thin_rule(),
        field("Producer ID", &producer.id),
        field("Name", &producer.name),
        field("County", &producer.county),
        field("District", &producer.district),
        field(
            "GPS coordinates",
            producer.gps_coordinates.as_deref().unwrap_or("Not recorded"),
        ),
        field("Registered farms", producer.farm_ids.join(", ")),
        field(
            "Commodity",
            producer.commodity.as_deref().unwrap_or("Cocoa"),
        ),
    ]
}

fn exporter_block(ctx: &PackContext<'_>) -> Vec<String> {
    let exporter = ctx.exporter;
    vec![
        String::new(),
        "EXPORTER & SHIPMENT".to_string(),
        thin_rule(),
        field("Exporter ID", &exporter.exporter_id),
        field("Exporter name", &exporter.exporter_name),
        field("Registration", &exporter.exporter_registration),
        field("Shipment ID", &exporter.shipment_id),
        field("Destination", &exporter.destination),
        field("Commodity", &exporter.commodity),
        field("HS code", &exporter.hs_code),
        field("Total weight", &exporter.total_weight),
        field("Harvest period", &exporter.harvest_period),
    ]
}

fn determination_block(ctx: &PackContext<'_>) -> Vec<String> {
    let det = &ctx.assessment.determination;
    let mut lines = vec![
        String::new(),
        "RISK DETERMINATION".to_string(),
        thin_rule(),
        field("Risk level", det.risk_level.to_string().to_uppercase()),
        field("Compliance score", format!("{}/100", det.compliance_score)),
        field(
            "Deforestation risk",
            format!("{}/100", det.deforestation_risk),
        ),
        field(
            "Forest loss detected",
            if det.forest_loss_detected { "YES" } else { "NO" },
        ),
    ];
    if let Some(date) = det.forest_loss_date {
        lines.push(field("Forest loss date", date.format("%Y-%m-%d")));
    }
    lines.extend([
        field(
            "Forest cover change",
            format!("{:+.1}%", det.forest_cover_change),
        ),
        field("Biodiversity impact", &det.biodiversity_impact),
        field(
            "Carbon stock loss",
            format!("{:.1} tCO2", det.carbon_stock_loss),
        ),
        field(
            "Deforestation-free since",
            det.last_forest_date.format("%Y-%m-%d"),
        ),
        field(
            "Assessed area",
            format!("{:.2} ha", ctx.assessment.area_hectares),
        ),
        field(
            "Assessment date",
            ctx.assessment.created_at.format("%Y-%m-%d"),
        ),
    ]);
    lines
}

pub fn cover_sheet(ctx: &PackContext<'_>) -> Vec<String> {
    let mut lines = vec![
        field("Pack ID", ctx.pack_id),
        field("Issued by", DocumentType::CoverSheet.issued_by()),
        field("Generated", ctx.generated_at.format("%Y-%m-%d %H:%M UTC")),
        String::new(),
        "This pack contains the six documents required for EUDR Article 9".to_string(),
        "due diligence. Each document carries its own reference number and".to_string(),
        "verification digest.".to_string(),
        String::new(),
        "CONTENTS".to_string(),
        thin_rule(),
    ];
    for (index, doc_type) in DocumentType::ALL.iter().enumerate() {
        lines.push(format!(
            "  {}. {:<44}{}",
            index + 1,
            doc_type.title(),
            ctx.reference(*doc_type)
        ));
    }
    lines.extend(producer_block(ctx));
    lines.extend(exporter_block(ctx));
    lines.extend(cross_references(ctx));
    lines
}

pub fn export_certificate(ctx: &PackContext<'_>) -> Vec<String> {
    let det = &ctx.assessment.determination;
    let mut lines = vec![
        field("Pack ID", ctx.pack_id),
        field("Issued by", DocumentType::ExportCertificate.issued_by()),
        String::new(),
        "The Liberia Agriculture Commodity Regulatory Authority certifies".to_string(),
        "that the shipment identified below originates from the registered".to_string(),
        "producer named herein and is eligible for export subject to the".to_string(),
        "attached risk determination.".to_string(),
    ];
    lines.extend(producer_block(ctx));
    lines.extend(exporter_block(ctx));
    lines.extend([
        String::new(),
        field("Risk level", det.risk_level.to_string().to_uppercase()),
        field("Compliance score", format!("{}/100", det.compliance_score)),
    ]);
    lines.extend(cross_references(ctx));
    lines
}

pub fn compliance_assessment(ctx: &PackContext<'_>) -> Vec<String> {
    let det = &ctx.assessment.determination;
    let mut lines = vec![
        field("Pack ID", ctx.pack_id),
        field("Issued by", DocumentType::ComplianceAssessment.issued_by()),
    ];
    lines.extend(producer_block(ctx));
    lines.extend(determination_block(ctx));

    lines.extend([
        String::new(),
        "REQUIRED DOCUMENTATION".to_string(),
        thin_rule(),
    ]);
    for item in &det.documentation_required {
        lines.push(format!("  - {}", item));
    }

    lines.extend([String::new(), "RECOMMENDATIONS".to_string(), thin_rule()]);
    for rec in &det.recommendations {
        lines.push(format!("  - {}", rec));
    }

    lines.extend(cross_references(ctx));
    lines
}

/// Requires producer GPS coordinates; no geolocation means the satellite
/// analysis section cannot be anchored and the pack must not assemble.
pub fn deforestation_report(ctx: &PackContext<'_>) -> Result<Vec<String>, DomainError> {
    let gps = ctx.producer.gps_coordinates.as_deref().ok_or_else(|| {
        DomainError::PackIncomplete(format!(
            "deforestation report requires GPS coordinates for producer {}",
            ctx.producer.id
        ))
    })?;

    let det = &ctx.assessment.determination;
    let mut lines = vec![
        field("Pack ID", ctx.pack_id),
        field("Issued by", DocumentType::DeforestationReport.issued_by()),
        String::new(),
        "SATELLITE MONITORING SUMMARY".to_string(),
        thin_rule(),
        field("Anchor coordinates", gps),
        field(
            "Boundary vertices",
            format_coordinates(&ctx.assessment.boundary),
        ),
        field(
            "Monitored area",
            format!("{:.2} ha", ctx.assessment.area_hectares),
        ),
    ];
    lines.extend(determination_block(ctx));

    // Protected areas are informational; they do not drive the risk tier
    lines.extend([
        String::new(),
        "PROTECTED AREAS MONITORED".to_string(),
        thin_rule(),
    ]);
    for zone in all_zones().iter().filter(|z| z.class == ZoneClass::Protected) {
        let overlaps = ctx
            .assessment
            .boundary
            .iter()
            .any(|p| zone.contains(p));
        lines.push(field(
            zone.name,
            if overlaps { "BOUNDARY OVERLAP" } else { "No overlap" },
        ));
    }

    lines.extend([
        String::new(),
        "FINDINGS".to_string(),
        thin_rule(),
        if det.forest_loss_detected {
            "Forest loss was detected within the monitored boundary after the".to_string()
        } else {
            "No forest loss was detected within the monitored boundary after".to_string()
        },
        format!(
            "deforestation-free cutoff date of {}.",
            det.last_forest_date.format("%Y-%m-%d")
        ),
    ]);
    lines.extend(cross_references(ctx));
    Ok(lines)
}

pub fn due_diligence_statement(ctx: &PackContext<'_>) -> Vec<String> {
    let det = &ctx.assessment.determination;
    let mut lines = vec![
        field("Pack ID", ctx.pack_id),
        field("Issued by", DocumentType::DueDiligenceStatement.issued_by()),
        String::new(),
        "STATEMENT".to_string(),
        thin_rule(),
        "The operator declares that due diligence in accordance with".to_string(),
        "Regulation (EU) 2023/1115 has been exercised for the commodity".to_string(),
        "covered by this pack, and that the risk identified is as stated".to_string(),
        "in the attached determination.".to_string(),
        String::new(),
        field("Declared risk level", det.risk_level.to_string().to_uppercase()),
        field("Compliance score", format!("{}/100", det.compliance_score)),
        String::new(),
        "SUPPORTING DOCUMENTATION".to_string(),
        thin_rule(),
    ];
    for item in &det.documentation_required {
        lines.push(format!("  - {}", item));
    }
    lines.extend(producer_block(ctx));
    lines.extend(exporter_block(ctx));
    lines.extend(cross_references(ctx));
    lines
}

pub fn traceability_report(ctx: &PackContext<'_>) -> Vec<String> {
    let producer = ctx.producer;
    let mut lines = vec![
        field("Pack ID", ctx.pack_id),
        field("Issued by", DocumentType::TraceabilityReport.issued_by()),
        String::new(),
        "SUPPLY CHAIN".to_string(),
        thin_rule(),
        field("Origin producer", format!("{} ({})", producer.name, producer.id)),
        field(
            "Origin location",
            format!("{}, {}", producer.district, producer.county),
        ),
        field(
            "GPS coordinates",
            producer.gps_coordinates.as_deref().unwrap_or("Not recorded"),
        ),
        field("Farm parcels", producer.farm_ids.join(", ")),
        field("Consignee", &ctx.exporter.exporter_name),
        field("Shipment", &ctx.exporter.shipment_id),
        field("Destination", &ctx.exporter.destination),
        field("Harvest period", &ctx.exporter.harvest_period),
        String::new(),
        "Each farm parcel above is registered with its polygon boundary;".to_string(),
        "the assessed boundary for this pack is recorded in the".to_string(),
        "deforestation analysis report.".to_string(),
    ];
    lines.extend(cross_references(ctx));
    lines
}
