mod partner_dto;

pub use partner_dto::{
    AddServicesDto, CreatePartnerDto, ListPartnersQuery, PartnerResponseDto, UpdatePartnerDto,
    UpdatePartnerRatingDto, UpdatePartnerStatusDto,
};
