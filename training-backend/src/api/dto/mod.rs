pub mod department_dto;
