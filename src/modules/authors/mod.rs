pub mod models;
pub mod profile;
pub mod routes;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use courselib_db::RepositoryFactory;
use courselib_kernel::{settings::PagingSettings, InitCtx, Module};
use serde_json::json;

use routes::LibraryState;

/// Mount name; routes live under `/api/authors`.
pub const MODULE_NAME: &str = "authors";

/// Authors and the courses they own
pub struct AuthorsModule {
    state: LibraryState,
}

impl AuthorsModule {
    pub fn new(repositories: Arc<dyn RepositoryFactory>, paging: PagingSettings) -> Self {
        Self {
            state: LibraryState {
                repositories,
                paging,
            },
        }
    }
}

#[async_trait]
impl Module for AuthorsModule {
    fn name(&self) -> &'static str {
        MODULE_NAME
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            max_page_size = self.state.paging.max_page_size,
            "authors module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.state.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(openapi_fragment())
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "authors module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "authors module stopped");
        Ok(())
    }
}

fn error_response(description: &str) -> serde_json::Value {
    json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": { "$ref": "#/components/schemas/ErrorResponse" }
            }
        }
    })
}

fn json_response(description: &str, schema: serde_json::Value) -> serde_json::Value {
    json!({
        "description": description,
        "content": { "application/json": { "schema": schema } }
    })
}

fn openapi_fragment() -> serde_json::Value {
    let author_id = json!({
        "name": "author_id", "in": "path", "required": true,
        "schema": { "type": "string", "format": "uuid" }
    });
    let course_id = json!({
        "name": "course_id", "in": "path", "required": true,
        "schema": { "type": "string", "format": "uuid" }
    });
    let page_number = json!({
        "name": "page_number", "in": "query", "required": false,
        "schema": { "type": "integer", "minimum": 1 }
    });
    let page_size = json!({
        "name": "page_size", "in": "query", "required": false,
        "schema": { "type": "integer", "minimum": 1 }
    });
    let pagination_header = json!({
        "X-Pagination": {
            "description": "JSON paging metadata and previous/next links",
            "schema": { "type": "string" }
        }
    });

    json!({
        "paths": {
            "/": {
                "get": {
                    "summary": "List authors",
                    "tags": ["Authors"],
                    "parameters": [page_number, page_size],
                    "responses": {
                        "200": {
                            "description": "One page of authors",
                            "headers": pagination_header,
                            "content": {
                                "application/json": {
                                    "schema": { "type": "array", "items": { "$ref": "#/components/schemas/Author" } }
                                }
                            }
                        },
                        "400": error_response("Invalid paging parameters")
                    }
                }
            },
            "/{author_id}": {
                "get": {
                    "summary": "Get an author",
                    "tags": ["Authors"],
                    "parameters": [author_id],
                    "responses": {
                        "200": json_response("The author", json!({ "$ref": "#/components/schemas/Author" })),
                        "404": error_response("Author not found")
                    }
                }
            },
            "/{author_id}/courses": {
                "get": {
                    "summary": "List courses of an author",
                    "tags": ["Courses"],
                    "parameters": [author_id, page_number, page_size],
                    "responses": {
                        "200": {
                            "description": "Courses of the author; paged when page_number or page_size is given",
                            "headers": pagination_header,
                            "content": {
                                "application/json": {
                                    "schema": { "type": "array", "items": { "$ref": "#/components/schemas/Course" } }
                                }
                            }
                        },
                        "400": error_response("Invalid paging parameters"),
                        "404": error_response("Author not found")
                    }
                },
                "post": {
                    "summary": "Create a course for an author",
                    "tags": ["Courses"],
                    "parameters": [author_id],
                    "requestBody": {
                        "required": true,
                        "content": {
                            "application/json": {
                                "schema": { "$ref": "#/components/schemas/CourseForCreation" }
                            }
                        }
                    },
                    "responses": {
                        "201": {
                            "description": "Course created",
                            "headers": {
                                "Location": {
                                    "description": "URL of the new course",
                                    "schema": { "type": "string" }
                                }
                            },
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/Course" }
                                }
                            }
                        },
                        "404": error_response("Author not found")
                    }
                }
            },
            "/{author_id}/courses/{course_id}": {
                "get": {
                    "summary": "Get a course of an author",
                    "tags": ["Courses"],
                    "parameters": [author_id, course_id],
                    "responses": {
                        "200": json_response("The course", json!({ "$ref": "#/components/schemas/Course" })),
                        "404": error_response("Author or course not found")
                    }
                },
                "put": {
                    "summary": "Update a course; omitted fields keep their value",
                    "tags": ["Courses"],
                    "parameters": [author_id, course_id],
                    "requestBody": {
                        "required": true,
                        "content": {
                            "application/json": {
                                "schema": { "$ref": "#/components/schemas/CourseForUpdate" }
                            }
                        }
                    },
                    "responses": {
                        "204": { "description": "Course updated" },
                        "404": error_response("Author or course not found")
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "Author": {
                    "type": "object",
                    "properties": {
                        "id": { "type": "string", "format": "uuid" },
                        "name": { "type": "string", "description": "First and last name" },
                        "age": { "type": "integer", "description": "Age in whole years" },
                        "main_category": { "type": "string" }
                    },
                    "required": ["id", "name", "age", "main_category"]
                },
                "Course": {
                    "type": "object",
                    "properties": {
                        "id": { "type": "string", "format": "uuid" },
                        "author_id": { "type": "string", "format": "uuid" },
                        "title": { "type": "string" },
                        "description": { "type": "string" }
                    },
                    "required": ["id", "author_id", "title"]
                },
                "CourseForCreation": {
                    "type": "object",
                    "properties": {
                        "title": { "type": "string" },
                        "description": { "type": "string" }
                    },
                    "required": ["title"]
                },
                "CourseForUpdate": {
                    "type": "object",
                    "properties": {
                        "title": { "type": "string" },
                        "description": { "type": "string" }
                    }
                }
            }
        }
    })
}

/// Create a new instance of the authors module
pub fn create_module(
    repositories: Arc<dyn RepositoryFactory>,
    paging: PagingSettings,
) -> Arc<dyn Module> {
    Arc::new(AuthorsModule::new(repositories, paging))
}
