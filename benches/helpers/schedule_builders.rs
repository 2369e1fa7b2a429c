use xschedule::{Schedule, ScheduleBuilder, ScheduleElementId, ScheduleId};

pub fn build_linear_schedule(size: usize) -> Schedule {
    let mut builder = ScheduleBuilder::new();
    let mut previous = None;
    for _ in 0..size {
        let action = builder.add_executing_action(ScheduleElementId::new());
        match &previous {
            None => builder.link_from_start(&action, None).unwrap(),
            Some(prev) => builder.link_to(prev, &action, None).unwrap(),
        }
        previous = Some(action);
    }
    if let Some(last) = previous {
        builder.link_to_end(&last, None).unwrap();
    }
    builder.build()
}

/// `width` parallel actions between a split and a join marker.
pub fn build_fanout_schedule(width: usize) -> Schedule {
    let mut builder = ScheduleBuilder::new();
    let split = builder.add_history_marking_point();
    let join = builder.add_history_marking_point();
    builder.link_from_start(&split, None).unwrap();
    builder.link_to_end(&join, None).unwrap();
    for _ in 0..width {
        let action = builder.add_executing_action(ScheduleElementId::new());
        builder
            .link_to(&split, &action, Some(ScheduleElementId::new()))
            .unwrap();
        builder.link_to(&action, &join, None).unwrap();
    }
    builder.build()
}

/// Fill an unlimited insert point `count` times, always splicing at the tail.
pub fn build_spliced_schedule(count: usize) -> Schedule {
    let mut builder = ScheduleBuilder::new();
    let mut insert = builder.add_insert_point(None).unwrap();
    builder.link_from_start(&insert, None).unwrap();
    builder.link_to_end(&insert, None).unwrap();
    for _ in 0..count {
        let splice = builder
            .insert_sub_schedule_in(&insert, ScheduleId::new())
            .unwrap();
        insert = splice.after.unwrap();
    }
    builder.build()
}

pub fn build_calling(target: ScheduleId) -> Schedule {
    let mut builder = ScheduleBuilder::new();
    let sub = builder.add_sub_schedule(target);
    builder.link_from_start(&sub, None).unwrap();
    builder.link_to_end(&sub, None).unwrap();
    builder.build()
}
