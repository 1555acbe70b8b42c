pub mod id_list;
pub mod pagination;
pub mod response;

pub use id_list::IdList;
pub use pagination::{PaginatedResponse, PaginationInfo, PaginationQuery};
pub use response::ApiResponse;
