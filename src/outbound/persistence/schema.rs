//! Diesel table definitions for the portal database.

diesel::table! {
    doctors (id) {
        id -> Uuid,
        nmr_id -> Varchar,
        full_name -> Varchar,
        specialization -> Varchar,
        email -> Varchar,
        phone -> Nullable<Varchar>,
        is_verified -> Bool,
        created_at -> Timestamptz,
        last_login -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    patients (id) {
        id -> Uuid,
        patient_id -> Varchar,
        full_name -> Varchar,
        date_of_birth -> Date,
        blood_group -> Nullable<Varchar>,
        contact_phone -> Nullable<Varchar>,
        emergency_contact -> Nullable<Varchar>,
        access_password_hash -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    doctor_patient_assignments (id) {
        id -> Uuid,
        doctor_id -> Uuid,
        patient_id -> Uuid,
        assigned_at -> Timestamptz,
        is_active -> Bool,
    }
}

diesel::table! {
    medical_records (id) {
        id -> Uuid,
        patient_id -> Uuid,
        recorded_by_doctor_id -> Uuid,
        visit_date -> Timestamptz,
        diagnosis -> Text,
        symptoms -> Nullable<Text>,
        treatment -> Nullable<Text>,
        medications -> Nullable<Text>,
        lab_results -> Nullable<Text>,
        notes -> Nullable<Text>,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(doctor_patient_assignments -> doctors (doctor_id));
diesel::joinable!(doctor_patient_assignments -> patients (patient_id));
diesel::joinable!(medical_records -> patients (patient_id));

diesel::allow_tables_to_appear_in_same_query!(
    doctors,
    patients,
    doctor_patient_assignments,
    medical_records,
);
