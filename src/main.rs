use xschedule::{
    InMemoryScheduleStore, ScheduleBuilder, ScheduleElementId, ScheduleError, ScheduleVerifier,
    TraversalDirection, VariableRef, VerifierConfig,
};

fn main() -> Result<(), ScheduleError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    println!("=== XSchedule ===\n");

    let store = InMemoryScheduleStore::new();

    // Template with a single open slot between two actions.
    let mut builder = ScheduleBuilder::new();
    let fetch = builder.add_executing_action(ScheduleElementId::new());
    let slot = builder.add_insert_point(Some(2))?;
    let sync = builder.add_synchronization_start([VariableRef::new("result")])?;
    let sync_end = builder.add_synchronization_end(&sync)?;
    builder.link_from_start(&fetch, None)?;
    builder.link_to(&fetch, &slot, None)?;
    builder.link_to(&slot, &sync, None)?;
    builder.link_to(&sync, &sync_end, None)?;
    builder.link_to_end(&sync_end, None)?;
    let template = builder.build();
    let template_info = store.add(template.clone(), "template", "fetch then sync", "");

    // Fill the slot with a call to a cleanup schedule.
    let mut cleanup = ScheduleBuilder::new();
    let history = cleanup.add_history_marking_point();
    cleanup.link_from_start(&history, None)?;
    cleanup.link_to_end(&history, None)?;
    let cleanup_info = store.add(cleanup.build(), "cleanup", "marks history", "");

    let mut derived = ScheduleBuilder::from(&template);
    let slot = derived
        .graph()
        .vertices()
        .find(|v| v.remaining_inserts().is_some())
        .cloned()
        .ok_or(ScheduleError::NotAnInsertPoint(slot.index()))?;
    let splice = derived.insert_sub_schedule_in(&slot, cleanup_info.id)?;
    println!(
        "Spliced {} (flanked: {})",
        splice.vertex,
        splice.before.is_some() && splice.after.is_some()
    );
    let derived = derived.build();
    let derived_info = store.add(derived, "derived", "template with cleanup", "");

    let verifier = ScheduleVerifier::new(VerifierConfig::default());
    for info in [&template_info, &cleanup_info, &derived_info] {
        let schedule = store.schedule(&info.id)?;
        let report = verifier.verify(info.id, &schedule, &store);
        tracing::info!(
            schedule = %info.name,
            vertices = schedule.vertex_count(),
            valid = report.is_valid,
            "schedule verified"
        );
        for failure in &report.failures {
            println!("  {}: {}", info.name, failure);
        }
    }

    let schedule = store.schedule(&derived_info.id)?;
    let mut order = Vec::new();
    schedule.traverse_all(schedule.start(), TraversalDirection::Outbound, |vertex, _| {
        order.push(vertex.to_string());
        true
    })?;
    println!("\nDerived schedule: {}", order.join(" -> "));

    Ok(())
}
