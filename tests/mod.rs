mod smoke_tests;

// This file organizes the integration tests into a cohesive test suite.
// Each module tests a specific aspect of the dashboard:
// - smoke_tests: configuration and component startup
// - roster_actor: schedule edits through the roster store
// - summarizer_mock: insight requests against a mock summarizer
// - web_routes: the HTTP surface
