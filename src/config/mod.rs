mod generated_file_registry;

pub use generated_file_registry::{
    DEFAULT_DECLARATION_FILE_NAME, GeneratedFileDeclaration, GeneratedFileRegistry,
    GeneratedFileRegistryCreationError,
};
