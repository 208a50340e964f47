//! Diesel table definitions, one table per entity kind.

diesel::table! {
    schedule_templates (id) {
        id -> BigInt,
        start_time -> Timestamptz,
        end_time -> Timestamptz,
        weekday_ids -> Array<BigInt>,
        vehicle_facility_ids -> Array<BigInt>,
    }
}

diesel::table! {
    schedule_instances (id) {
        id -> BigInt,
        instance_date -> Date,
        start_time -> Nullable<Timestamptz>,
        end_time -> Nullable<Timestamptz>,
        vehicle_number -> Nullable<Text>,
        notes -> Nullable<Text>,
        schedule_template_id -> Nullable<BigInt>,
    }
}

diesel::table! {
    weekdays (id) {
        id -> BigInt,
        name -> Text,
    }
}

diesel::table! {
    vehicle_facilities (id) {
        id -> BigInt,
        name -> Text,
        description -> Nullable<Text>,
    }
}

diesel::allow_tables_to_appear_in_same_query!(
    schedule_templates,
    schedule_instances,
    weekdays,
    vehicle_facilities,
);
