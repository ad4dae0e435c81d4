//! Conversions from stored rows into API response types.
//!
//! Enum columns are stored as strings; a value that no longer parses is
//! reported as a server error rather than silently defaulted.

use chrono::Datelike;
use nulo_entity::{application, favorite, landlord, message, property, tenant, transaction, user};
use nulo_types::{
    ApplicationResponse, FavoriteResponse, LandlordInfo, LandlordProfile, MessageResponse,
    Participant, PropertyResponse, PropertySummary, TenantProfile, TransactionResponse,
    UnknownVariant, UserResponse, UserSummary,
};
use std::str::FromStr;

use crate::error::{AppError, Result};

pub(crate) fn parse<T: FromStr<Err = UnknownVariant>>(value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|e: UnknownVariant| AppError::ServerError(e.to_string()))
}

pub fn tenant_profile(tenant: &tenant::Model) -> TenantProfile {
    TenantProfile {
        budget: tenant.budget,
        preferred_location: tenant.preferred_location.clone(),
        move_in_date: tenant.move_in_date,
        preferences: tenant.preferences.clone(),
        documents: tenant.documents.clone(),
        profile_completion: tenant.profile_completion,
        onboarding_completed: tenant.onboarding_completed,
        profile_completed_at: tenant.profile_completed_at,
    }
}

pub fn landlord_profile(landlord: &landlord::Model) -> LandlordProfile {
    LandlordProfile {
        ownership_docs: landlord.ownership_doc_urls(),
        verification_submitted_at: landlord.verification_submitted_at,
        verification_approved_at: landlord.verification_approved_at,
        guarantee_joined: landlord.guarantee_joined,
        guarantee_contribution: landlord.guarantee_contribution,
        bank_account_number: landlord.bank_account_number.clone(),
        bank_name: landlord.bank_name.clone(),
    }
}

pub fn user_response(
    user: &user::Model,
    tenant: Option<&tenant::Model>,
    landlord: Option<&landlord::Model>,
) -> Result<UserResponse> {
    Ok(UserResponse {
        id: user.id,
        email: user.email.clone(),
        full_name: user.full_name.clone(),
        avatar_url: user.avatar_url.clone(),
        phone_number: user.phone_number.clone(),
        user_type: parse(&user.user_type)?,
        trust_score: user.trust_score,
        verification_status: parse(&user.verification_status)?,
        created_at: user.created_at,
        tenant_profile: tenant.map(tenant_profile),
        landlord_profile: landlord.map(landlord_profile),
    })
}

pub fn user_summary(user: &user::Model) -> UserSummary {
    UserSummary {
        id: user.id,
        full_name: user.full_name.clone(),
        avatar_url: user.avatar_url.clone(),
        trust_score: user.trust_score,
    }
}

pub fn participant(user: &user::Model) -> Result<Participant> {
    Ok(Participant {
        id: user.id,
        name: user.full_name.clone(),
        avatar_url: user.avatar_url.clone(),
        user_type: parse(&user.user_type)?,
    })
}

pub fn landlord_info(
    user: &user::Model,
    landlord: Option<&landlord::Model>,
    properties_count: u64,
) -> LandlordInfo {
    LandlordInfo {
        id: user.id,
        name: user.full_name.clone(),
        avatar_url: user.avatar_url.clone(),
        trust_score: user.trust_score,
        verified: user.is_verified(),
        properties_count,
        joined_year: user.created_at.year(),
        guarantee_joined: landlord.map(|l| l.guarantee_joined).unwrap_or(false),
    }
}

pub fn property_response(
    property: &property::Model,
    landlord: Option<LandlordInfo>,
    is_favorited: bool,
) -> Result<PropertyResponse> {
    Ok(PropertyResponse {
        id: property.id,
        landlord_id: property.landlord_id,
        title: property.title.clone(),
        description: property.description.clone(),
        rent_amount: property.rent_amount,
        security_deposit: property.security_deposit,
        agency_fee: property.agency_fee,
        location: property.location.clone(),
        address: property.address.clone(),
        city: property.city.clone(),
        state: property.state.clone(),
        country: property.country.clone(),
        latitude: property.latitude,
        longitude: property.longitude,
        bedrooms: property.bedrooms,
        bathrooms: property.bathrooms,
        square_feet: property.square_feet,
        property_type: parse(&property.property_type)?,
        amenities: property.amenity_list(),
        photos: property.photo_list(),
        availability_start: property.availability_start,
        status: parse(&property.status)?,
        view_count: property.view_count,
        favorite_count: property.favorite_count,
        application_count: property.application_count,
        slug: property.slug.clone(),
        verified: property.verified,
        verified_at: property.verified_at,
        created_at: property.created_at,
        updated_at: property.updated_at,
        landlord,
        is_favorited,
    })
}

pub fn property_summary(property: &property::Model, landlord: Option<UserSummary>) -> PropertySummary {
    PropertySummary {
        id: property.id,
        landlord_id: property.landlord_id,
        title: property.title.clone(),
        location: property.location.clone(),
        rent_amount: property.rent_amount,
        photos: property.photo_list(),
        landlord,
    }
}

pub fn application_response(
    application: &application::Model,
    property: Option<PropertySummary>,
    tenant: Option<UserSummary>,
) -> Result<ApplicationResponse> {
    Ok(ApplicationResponse {
        id: application.id,
        tenant_id: application.tenant_id,
        property_id: application.property_id,
        status: parse(&application.status)?,
        message: application.message.clone(),
        proposed_move_in_date: application.proposed_move_in_date,
        documents: application.documents.clone(),
        rejection_reason: application.rejection_reason.clone(),
        reason_code: application.reason_code.clone(),
        reviewed_at: application.reviewed_at,
        reviewed_by: application.reviewed_by,
        created_at: application.created_at,
        updated_at: application.updated_at,
        property,
        tenant,
    })
}

pub fn transaction_response(escrow: &transaction::Model) -> Result<TransactionResponse> {
    Ok(TransactionResponse {
        id: escrow.id,
        application_id: escrow.application_id,
        tenant_id: escrow.tenant_id,
        landlord_id: escrow.landlord_id,
        property_id: escrow.property_id,
        amount: escrow.amount,
        currency: escrow.currency.clone(),
        status: parse(&escrow.status)?,
        payment_gateway: escrow.payment_gateway.clone(),
        transaction_type: escrow.transaction_type.clone(),
        held_at: escrow.held_at,
        released_at: escrow.released_at,
        refunded_at: escrow.refunded_at,
        notes: escrow.notes.clone(),
        created_at: escrow.created_at,
    })
}

pub fn message_response(
    message: &message::Model,
    sender: Option<Participant>,
    recipient: Option<Participant>,
) -> MessageResponse {
    MessageResponse {
        id: message.id,
        sender_id: message.sender_id,
        recipient_id: message.recipient_id,
        content: message.content.clone(),
        property_id: message.property_id,
        application_id: message.application_id,
        message_type: message.message_type.clone(),
        read: message.read,
        read_at: message.read_at,
        attachments: message.attachments.clone(),
        timestamp: message.timestamp,
        sender,
        recipient,
    }
}

pub fn favorite_response(favorite: &favorite::Model) -> FavoriteResponse {
    FavoriteResponse {
        id: favorite.id,
        tenant_id: favorite.tenant_id,
        property_id: favorite.property_id,
        created_at: favorite.created_at,
    }
}
